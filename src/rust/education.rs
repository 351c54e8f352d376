use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub answer: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningLink {
    pub title: &'static str,
    pub url: &'static str,
}

pub const QUIZ: [QuizQuestion; 4] = [
    QuizQuestion {
        prompt: "What should you do with cardboard before recycling it?",
        options: &["Soak it in water", "Flatten it and keep it dry", "Wrap it in plastic"],
        answer: 1,
    },
    QuizQuestion {
        prompt: "Which of these usually belongs in the glass bin?",
        options: &["Drinking glasses", "Mirrors", "Empty jars with lids removed"],
        answer: 2,
    },
    QuizQuestion {
        prompt: "What do the numbers inside the recycling symbol on plastic tell you?",
        options: &["The resin type", "How many times it was recycled", "The weight in grams"],
        answer: 0,
    },
    QuizQuestion {
        prompt: "Which waste earns the most EXP when classified?",
        options: &["Plastic", "Metal", "Food"],
        answer: 1,
    },
];

pub const LEARNING_LINKS: [LearningLink; 3] = [
    LearningLink {
        title: "EPA: How Do I Recycle Common Recyclables",
        url: "https://www.epa.gov/recycle/how-do-i-recycle-common-recyclables",
    },
    LearningLink {
        title: "UNEP: Beat Plastic Pollution",
        url: "https://www.unep.org/interactives/beat-plastic-pollution/",
    },
    LearningLink {
        title: "EPA: Reducing the Impact of Wasted Food",
        url: "https://www.epa.gov/sustainable-management-food",
    },
];

/// Grades `answers` against [`QUIZ`] position by position; missing answers count as wrong.
pub fn grade(answers: &[usize]) -> QuizScore {
    let correct = QUIZ
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.is_correct(**a))
        .count();
    QuizScore {
        correct,
        total: QUIZ.len(),
    }
}

/// Like [`grade`], but with options numbered from 1 as they are shown to the user.
pub fn grade_numbered(numbers: &[usize]) -> QuizScore {
    let answers: Vec<usize> = numbers
        .iter()
        .map(|n| n.checked_sub(1).unwrap_or(usize::MAX))
        .collect();
    grade(&answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_point_at_options() {
        assert!(QUIZ.iter().all(|q| q.answer < q.options.len()));
    }

    #[test]
    fn test_grade() {
        assert_eq!(grade(&[1, 2, 0, 1]), QuizScore { correct: 4, total: 4 });
        assert_eq!(grade(&[0, 2]), QuizScore { correct: 1, total: 4 });
        assert_eq!(grade(&[9, 9, 9, 9, 9]).correct, 0);
    }

    #[test]
    fn test_grade_numbered_from_one() {
        assert_eq!(grade_numbered(&[2, 3, 1, 2]), QuizScore { correct: 4, total: 4 });
        assert_eq!(grade_numbered(&[0, 0, 0, 0]).correct, 0);
        assert_eq!(grade_numbered(&[1, 2, 3, 1]).correct, 0);
    }
}
