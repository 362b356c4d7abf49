//! Static advice and roadmaps keyed by personality type.
//!
//! Keys are label names as produced by the reference catalog. Unknown labels get
//! generic advice, and the Analyst roadmap.

struct AdviceTemplate {
    greeting: &'static str,
    advice: &'static str,
}

const GENERIC: AdviceTemplate = AdviceTemplate {
    greeting: "Hello! I'm here to help with your career development.",
    advice: "Based on your assessment, I recommend exploring careers that align with your \
        interests and strengths. Consider taking additional assessments or speaking with a \
        career counselor for more personalized guidance.",
};

const CLOSING: &str = "Feel free to ask me specific questions about career paths, skill \
    development, or job search strategies!";

fn advice_template(personality_type: &str) -> &'static AdviceTemplate {
    const ANALYST: AdviceTemplate = AdviceTemplate {
        greeting: "Hello! As a Strategic Analyst, you excel at deep thinking and problem-solving.",
        advice: "Consider roles that leverage your analytical strengths like data science, \
            research, or technical consulting. Focus on developing your communication skills \
            to better share your insights with others.",
    };
    const LEADER: AdviceTemplate = AdviceTemplate {
        greeting: "Hello! As a Dynamic Leader, you have natural leadership abilities and drive results.",
        advice: "Look for opportunities to take on leadership roles in project management, \
            sales, or business development. Consider developing your technical skills to \
            complement your leadership abilities.",
    };
    const COLLABORATOR: AdviceTemplate = AdviceTemplate {
        greeting: "Hello! As a Relationship Builder, you excel at working with people and building teams.",
        advice: "Consider careers in human resources, customer success, or account management. \
            Focus on developing some technical or analytical skills to broaden your career options.",
    };

    match personality_type {
        "Analyst" => &ANALYST,
        "Leader" => &LEADER,
        "Collaborator" => &COLLABORATOR,
        _ => &GENERIC,
    }
}

/// Greeting, advice, and closing line for a personality type.
pub fn default_advice(personality_type: &str) -> String {
    let t = advice_template(personality_type);
    format!("{}\n\n{}\n\n{}", t.greeting, t.advice, CLOSING)
}

const ANALYST_ROADMAP: [&str; 5] = [
    "Strengthen technical skills (programming, data analysis tools)",
    "Build a portfolio of analytical projects",
    "Develop presentation skills to share insights effectively",
    "Network with other analysts and data professionals",
    "Consider certifications in your field of interest",
];

const LEADER_ROADMAP: [&str; 5] = [
    "Take on leadership opportunities in current role",
    "Develop strategic thinking through courses or mentoring",
    "Build a track record of successful project deliveries",
    "Network with senior leaders in your industry",
    "Consider MBA or leadership development programs",
];

const COLLABORATOR_ROADMAP: [&str; 5] = [
    "Develop expertise in relationship management",
    "Build strong communication and facilitation skills",
    "Gain experience in team coordination and project management",
    "Network across different departments and industries",
    "Consider roles that bridge technical and business teams",
];

/// Five development steps for a personality type.
pub fn roadmap_steps(personality_type: &str) -> Vec<String> {
    let steps = match personality_type {
        "Leader" => &LEADER_ROADMAP,
        "Collaborator" => &COLLABORATOR_ROADMAP,
        _ => &ANALYST_ROADMAP,
    };
    steps.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type_gets_tailored_greeting() {
        let advice = default_advice("Leader");
        assert!(advice.starts_with("Hello! As a Dynamic Leader"));
        assert!(advice.ends_with(CLOSING));
    }

    #[test]
    fn test_unknown_or_empty_type_gets_generic_advice() {
        for label in ["", "Wizard", "analyst"] {
            assert!(default_advice(label).starts_with(GENERIC.greeting));
        }
    }

    #[test]
    fn test_advice_sections_separated_by_blank_lines() {
        assert_eq!(default_advice("Collaborator").split("\n\n").count(), 3);
    }

    #[test]
    fn test_roadmaps_have_five_steps() {
        for label in ["Analyst", "Leader", "Collaborator"] {
            assert_eq!(roadmap_steps(label).len(), 5);
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_analyst_roadmap() {
        assert_eq!(roadmap_steps("Wizard"), roadmap_steps("Analyst"));
        assert_ne!(roadmap_steps("Leader"), roadmap_steps("Analyst"));
    }
}
