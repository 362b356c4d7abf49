//! The built-in English career-personality catalog.
//!
//! Label order is Analyst, Leader, Collaborator. That order is also the tie-break
//! order, so it must not change. Option keys are the stable identifiers stored
//! with historical submissions.

use std::collections::BTreeMap;

use crate::assessment::catalog::{
    Catalog, CatalogDefinition, CatalogError, Label, LabelDefinition, LabelProfile,
    OptionDefinition, QuestionDefinition,
};

pub const REFERENCE_REVISION: &str = "reference-v1";

pub const ANALYST: &str = "Analyst";
pub const LEADER: &str = "Leader";
pub const COLLABORATOR: &str = "Collaborator";

pub fn reference_catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(reference_definition())
}

pub fn reference_definition() -> CatalogDefinition {
    CatalogDefinition {
        revision: REFERENCE_REVISION.to_string(),
        labels: vec![analyst(), leader(), collaborator()],
        questions: vec![
            question(
                1,
                "When working on a project, you prefer to:",
                [
                    ("independent", "Work independently and focus deeply", [3, 1, 0]),
                    ("lead-team", "Lead a team and make decisions", [0, 3, 1]),
                    ("collaborate", "Collaborate closely with others", [1, 1, 3]),
                ],
            ),
            question(
                2,
                "Your ideal work environment is:",
                [
                    ("quiet-office", "Quiet office with minimal interruptions", [3, 1, 0]),
                    ("dynamic-office", "Dynamic office with lots of meetings", [0, 3, 2]),
                    ("flexible-team", "Flexible workspace with team collaboration", [1, 1, 3]),
                ],
            ),
            question(
                3,
                "When facing a problem, you:",
                [
                    ("research", "Analyze data and research thoroughly", [3, 1, 1]),
                    ("take-charge", "Take charge and find quick solutions", [1, 3, 1]),
                    ("brainstorm", "Discuss with team and brainstorm together", [1, 1, 3]),
                ],
            ),
            question(
                4,
                "You're most motivated by:",
                [
                    ("puzzles", "Solving complex puzzles and discovering patterns", [3, 0, 0]),
                    ("results", "Achieving goals and driving results", [0, 3, 1]),
                    ("relationships", "Building relationships and helping others succeed", [0, 1, 3]),
                ],
            ),
            question(
                5,
                "Your communication style is:",
                [
                    ("data-driven", "Detailed and data-driven", [3, 1, 0]),
                    ("direct", "Direct and action-oriented", [1, 3, 1]),
                    ("warm", "Warm and relationship-focused", [0, 1, 3]),
                ],
            ),
            question(
                6,
                "In meetings, you typically:",
                [
                    ("analyze", "Listen carefully and provide detailed analysis", [3, 0, 1]),
                    ("drive-agenda", "Take initiative and drive the agenda", [0, 3, 1]),
                    ("facilitate", "Facilitate discussion and ensure everyone contributes", [1, 1, 3]),
                ],
            ),
            question(
                7,
                "You enjoy tasks that involve:",
                [
                    ("analysis", "Research, analysis, and problem-solving", [3, 1, 0]),
                    ("strategy", "Strategy, planning, and execution", [1, 3, 1]),
                    ("mentoring", "Team building, mentoring, and collaboration", [0, 1, 3]),
                ],
            ),
            question(
                8,
                "When learning something new, you prefer to:",
                [
                    ("self-study", "Study materials independently and deeply", [3, 1, 0]),
                    ("hands-on", "Jump in and learn through experience", [1, 3, 1]),
                    ("peer-learning", "Learn with others and share knowledge", [1, 1, 3]),
                ],
            ),
        ],
    }
}

/// Builds a question whose options weight (Analyst, Leader, Collaborator).
fn question(
    id: u32,
    prompt: &str,
    options: [(&str, &str, [u32; 3]); 3],
) -> QuestionDefinition {
    QuestionDefinition {
        id,
        prompt: prompt.to_string(),
        options: options
            .into_iter()
            .map(|(key, text, [analyst, leader, collaborator])| OptionDefinition {
                key: key.to_string(),
                text: text.to_string(),
                weights: BTreeMap::from([
                    (Label::from(ANALYST), analyst),
                    (Label::from(LEADER), leader),
                    (Label::from(COLLABORATOR), collaborator),
                ]),
            })
            .collect(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn analyst() -> LabelDefinition {
    LabelDefinition {
        label: ANALYST.into(),
        profile: LabelProfile {
            name: "The Strategic Analyst".to_string(),
            description: "You're detail-oriented, analytical, and thrive on solving complex \
                problems through research and data analysis."
                .to_string(),
            characteristics: strings(&[
                "Highly analytical and methodical",
                "Prefer working independently",
                "Excel at research and data interpretation",
                "Value accuracy and precision",
                "Enjoy deep, focused work",
            ]),
            career_matches: strings(&[
                "Data Scientist",
                "Research Analyst",
                "Software Engineer",
                "Financial Analyst",
                "Business Intelligence Analyst",
                "Product Manager (Technical)",
                "Consultant (Strategy/Analytics)",
            ]),
            strengths: strings(&[
                "Critical thinking",
                "Problem-solving",
                "Attention to detail",
                "Data analysis",
                "Research skills",
            ]),
            development_areas: strings(&[
                "Public speaking",
                "Team leadership",
                "Networking",
                "Quick decision-making",
            ]),
        },
    }
}

fn leader() -> LabelDefinition {
    LabelDefinition {
        label: LEADER.into(),
        profile: LabelProfile {
            name: "The Dynamic Leader".to_string(),
            description: "You're action-oriented, decisive, and excel at driving results \
                through leadership and strategic thinking."
                .to_string(),
            characteristics: strings(&[
                "Natural leadership abilities",
                "Goal-oriented and results-driven",
                "Comfortable making decisions",
                "Thrive in dynamic environments",
                "Excellent at motivating others",
            ]),
            career_matches: strings(&[
                "Project Manager",
                "Sales Manager",
                "Marketing Director",
                "Entrepreneur",
                "Operations Manager",
                "Team Lead",
                "Business Development Manager",
            ]),
            strengths: strings(&[
                "Leadership",
                "Decision-making",
                "Strategic thinking",
                "Communication",
                "Goal achievement",
            ]),
            development_areas: strings(&[
                "Patience with details",
                "Collaborative decision-making",
                "Technical skills",
                "Active listening",
            ]),
        },
    }
}

fn collaborator() -> LabelDefinition {
    LabelDefinition {
        label: COLLABORATOR.into(),
        profile: LabelProfile {
            name: "The Relationship Builder".to_string(),
            description: "You're people-focused, collaborative, and excel at building \
                relationships and fostering team success."
                .to_string(),
            characteristics: strings(&[
                "Excellent interpersonal skills",
                "Team-oriented approach",
                "Strong communication abilities",
                "Empathetic and supportive",
                "Thrive in collaborative environments",
            ]),
            career_matches: strings(&[
                "Human Resources Specialist",
                "Customer Success Manager",
                "Marketing Coordinator",
                "Training & Development",
                "Community Manager",
                "Account Manager",
                "Social Worker",
            ]),
            strengths: strings(&[
                "Relationship building",
                "Communication",
                "Team collaboration",
                "Empathy",
                "Conflict resolution",
            ]),
            development_areas: strings(&[
                "Data analysis",
                "Independent work",
                "Technical skills",
                "Direct feedback delivery",
            ]),
        },
    }
}
