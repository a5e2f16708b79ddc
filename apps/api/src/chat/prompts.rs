// Chat grounding prompt. Rebuilt from the live content store on every
// request so the assistant always answers from current data.

use std::fmt::Write;

use crate::content::store::ContentView;

/// Builds the system prompt that grounds the assistant in the résumé
/// content: profile, skills, experience, projects, and certifications.
pub fn system_prompt(view: &ContentView) -> String {
    let profile = &view.profile;

    let skills = view
        .skills
        .iter()
        .map(|s| format!("- {}", s.name))
        .collect::<Vec<_>>()
        .join("\n");

    let experiences = view
        .experiences
        .iter()
        .map(|e| {
            format!(
                "{} at {} ({}):\n{}",
                e.role,
                e.company,
                e.period,
                e.description.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let projects = view
        .projects
        .iter()
        .map(|p| {
            format!(
                "{} ({}):\n{}",
                p.title,
                p.tech.join(", "),
                p.description.join("\n")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut certifications = String::new();
    for c in &view.certifications {
        let _ = write!(certifications, "- {} ({}, {})", c.name, c.issuer, c.year);
        if let Some(link) = &c.link {
            let _ = write!(certifications, " [Link: {link}]");
        }
        certifications.push('\n');
    }

    format!(
        "You are an AI assistant representing {name}, a {role}.\n\
         Use the following resume data to answer questions from recruiters or visitors.\n\
         Be professional, concise, and enthusiastic.\n\n\
         Profile:\n\
         Name: {name}\n\
         Role: {role}\n\
         Location: {location}\n\
         Contact: {email}, {phone}\n\
         Summary: {summary}\n\n\
         Skills:\n{skills}\n\n\
         Experience:\n{experiences}\n\n\
         Projects:\n{projects}\n\n\
         Certifications:\n{certifications}\n\
         If asked about something not in this resume, politely state that you don't have \
         that information handy but invite them to email {name}.\n\
         Keep answers relatively short (under 100 words) unless asked for details.",
        name = profile.name,
        role = profile.role,
        location = profile.location,
        email = profile.email,
        phone = profile.phone,
        summary = profile.summary,
        skills = skills,
        experiences = experiences,
        projects = projects,
        certifications = certifications,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::defaults;

    #[test]
    fn test_prompt_contains_profile_identity() {
        let prompt = system_prompt(&defaults::content_store().view());
        assert!(prompt.contains("representing Anantkumar Saunshi, a Junior Data Analyst"));
        assert!(prompt.contains("Contact: anantbs2323@gmail.com, +91-6361569670"));
    }

    #[test]
    fn test_prompt_lists_every_skill() {
        let store = defaults::content_store();
        let prompt = system_prompt(&store.view());
        for skill in store.skills.items() {
            assert!(prompt.contains(&format!("- {}", skill.name)));
        }
    }

    #[test]
    fn test_prompt_includes_experience_and_project_digests() {
        let prompt = system_prompt(&defaults::content_store().view());
        assert!(prompt.contains("Data Analytics Intern at Beasent Technology"));
        assert!(prompt.contains("HR Data Analytics Dashboard (Power BI, Excel, DAX)"));
    }

    #[test]
    fn test_prompt_includes_certification_links() {
        let prompt = system_prompt(&defaults::content_store().view());
        assert!(prompt
            .contains("- Python Programming (Geeks for Geeks, 2025) [Link: https://www.geeksforgeeks.org/]"));
    }

    #[test]
    fn test_prompt_reflects_current_store_not_seed() {
        let mut store = defaults::content_store();
        let mut profile = store.profile.clone();
        profile.name = "Edited Name".to_string();
        store.set_profile(profile);
        let prompt = system_prompt(&store.view());
        assert!(prompt.contains("Edited Name"));
        assert!(!prompt.contains("Anantkumar"));
    }
}
