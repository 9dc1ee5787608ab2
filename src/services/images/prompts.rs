//! Prompt templates shared by the image providers.

use crate::domain::{ProjectSpec, ProjectType};

const STYLE_SUFFIX: &str = "photorealistic, professional DIY construction, \
     seamlessly blending with garden surroundings, daylight photography";

const SCENE_SUFFIX: &str = "in a Swedish residential garden, summer daylight, \
     photorealistic architectural photography";

const GENERIC_SUBJECT: &str = "outdoor garden structure";

/// Phrase describing the finished structure, if the type has one.
pub fn subject(project_type: &ProjectType) -> Option<&'static str> {
    let phrase = match project_type {
        ProjectType::OutdoorKitchen => {
            "modern outdoor kitchen with built-in stainless steel gas grill, granite countertop, \
             wooden storage cabinets underneath, professional outdoor cooking station"
        }
        ProjectType::Deck => {
            "wooden deck with horizontal pressure-treated planks, clean professional construction"
        }
        ProjectType::Shed => {
            "traditional Swedish garden shed painted in Falu red with white window trim, wooden door"
        }
        ProjectType::Pergola => "modern wooden pergola structure with thick timber beams overhead",
        ProjectType::Fence => "wooden privacy fence with vertical boards, natural wood finish",
        ProjectType::Carport => "modern wooden carport with flat angled roof, open sides",
        ProjectType::PlanterBox => {
            "large wooden raised garden bed planter box for flowers and vegetables, \
             natural wood finish"
        }
        ProjectType::Playhouse => {
            "small wooden playhouse for children, painted in bright colors, \
             with small door and window"
        }
        ProjectType::Greenhouse => {
            "glass greenhouse structure with aluminum frame, transparent walls"
        }
        ProjectType::Other | ProjectType::Unknown(_) => return None,
    };
    Some(phrase)
}

/// Joins the non-blank parts with `", "`.
fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt for masked inpainting into the user's photo.
pub fn inpaint_prompt(spec: &ProjectSpec) -> String {
    let base = subject(&spec.project_type).unwrap_or_default();
    if base.is_empty() && spec.description.trim().is_empty() {
        return "outdoor garden structure, photorealistic, professional construction, daylight"
            .to_string();
    }
    join(&[base, spec.description.as_str(), STYLE_SUFFIX])
}

/// Prompt for text-to-image generation without a source photo.
///
/// Types without their own phrase are drawn as an outdoor kitchen.
pub fn generation_prompt(spec: &ProjectSpec) -> String {
    let base = subject(&spec.project_type)
        .or_else(|| subject(&ProjectType::OutdoorKitchen))
        .unwrap_or(GENERIC_SUBJECT);
    let width = format!("{}m wide", spec.dimensions.sanitized().width);
    join(&[base, spec.description.as_str(), width.as_str(), SCENE_SUFFIX])
}

/// Prompt for refining an image the user has edited.
pub fn refine_prompt(spec: &ProjectSpec, annotations: &str) -> String {
    let base = subject(&spec.project_type).unwrap_or(GENERIC_SUBJECT);
    let change = if annotations.trim().is_empty() {
        "refined version".to_string()
    } else {
        format!("incorporating changes: {}", annotations.trim())
    };
    join(&[base, change.as_str(), spec.description.as_str(), STYLE_SUFFIX])
}

/// Prompt for the URL-based renderer.
pub fn render_prompt(spec: &ProjectSpec) -> String {
    let base = subject(&spec.project_type).unwrap_or(GENERIC_SUBJECT);
    let width = format!("{}m wide", spec.dimensions.sanitized().width);
    join(&[
        base,
        spec.description.as_str(),
        width.as_str(),
        SCENE_SUFFIX,
        "professional DIY construction",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dimensions;

    fn spec(project_type: ProjectType, description: &str) -> ProjectSpec {
        ProjectSpec::new(
            project_type,
            Dimensions::new(3.0, 2.0, 2.4),
            Some(description.to_string()),
        )
    }

    #[test]
    fn inpaint_prompt_combines_subject_and_description() {
        let prompt = inpaint_prompt(&spec(ProjectType::Shed, "with a green door"));
        assert!(prompt.starts_with("traditional Swedish garden shed"));
        assert!(prompt.contains(", with a green door, photorealistic"));
        assert!(prompt.ends_with("daylight photography"));
    }

    #[test]
    fn inpaint_prompt_for_other_uses_description_only() {
        let prompt = inpaint_prompt(&spec(ProjectType::Other, "a small bike shelter"));
        assert!(prompt.starts_with("a small bike shelter, photorealistic"));

        let bare = inpaint_prompt(&spec(ProjectType::Other, "  "));
        assert_eq!(
            bare,
            "outdoor garden structure, photorealistic, professional construction, daylight"
        );
    }

    #[test]
    fn generation_prompt_mentions_width_and_skips_blank_description() {
        let prompt = generation_prompt(&spec(ProjectType::Deck, ""));
        assert!(prompt.contains("planks, clean professional construction, 3m wide, in a Swedish"));
        assert!(!prompt.contains(", ,"));
    }

    #[test]
    fn prompts_never_mention_invalid_widths() {
        let spec = ProjectSpec::new(ProjectType::Fence, Dimensions::new(-3.0, 1.0, 1.2), None);
        for prompt in [generation_prompt(&spec), render_prompt(&spec)] {
            assert!(prompt.contains(", 0m wide, "), "{prompt}");
            assert!(!prompt.contains("-3"), "{prompt}");
        }
    }

    #[test]
    fn generation_prompt_defaults_to_kitchen() {
        let prompt = generation_prompt(&spec(ProjectType::Unknown("x".into()), ""));
        assert!(prompt.starts_with("modern outdoor kitchen"));
    }

    #[test]
    fn refine_prompt_uses_annotations_when_present() {
        let with = refine_prompt(&spec(ProjectType::Pergola, ""), "taller posts");
        assert!(with.contains("incorporating changes: taller posts"));

        let without = refine_prompt(&spec(ProjectType::Pergola, ""), "");
        assert!(without.contains("refined version"));
        assert!(!without.contains("incorporating"));
    }
}
