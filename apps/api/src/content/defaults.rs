//! Built-in seed content. A fresh process serves this portfolio until the
//! operator edits it or restores a backup; nothing here survives a restart.

use crate::content::store::{Collection, ContentStore};
use crate::models::content::{Certification, Education, Experience, Profile, Project, Skill};

pub fn profile() -> Profile {
    Profile {
        name: "Anantkumar Saunshi".to_string(),
        role: "Junior Data Analyst".to_string(),
        location: "Bangalore, Karnataka".to_string(),
        phone: "+91-6361569670".to_string(),
        email: "anantbs2323@gmail.com".to_string(),
        summary: "Analytical and motivated Computer Science Engineering student (B.E., 2025) \
                  with strong proficiency in Python (Pandas, NumPy, PyTorch), SQL, and Power BI. \
                  Experienced in building dashboards, automating reports, and leveraging AI tools \
                  for data-driven business insights. Passionate about Data Analytics, BI, and \
                  AI-powered analytics."
            .to_string(),
        status: Some("Available for roles".to_string()),
        avatar: Some("https://picsum.photos/seed/anant/600/600".to_string()),
        resume_url: Some(String::new()),
    }
}

pub fn skills() -> Vec<Skill> {
    let levels = [
        ("Python & Pandas", 90),
        ("SQL (MySQL)", 85),
        ("Power BI & Excel", 88),
        ("Data Visualization", 80),
        ("Machine Learning Basics", 70),
        ("Gen AI Tools (Gemini/ChatGPT)", 85),
    ];
    levels
        .into_iter()
        .map(|(name, level)| Skill {
            id: 0,
            name: name.to_string(),
            level,
        })
        .collect()
}

pub fn experiences() -> Vec<Experience> {
    vec![Experience {
        id: 0,
        role: "Data Analytics Intern".to_string(),
        company: "Beasent Technology".to_string(),
        period: "Jul 2025 – Sep 2025 (Remote)".to_string(),
        description: vec![
            "Reduced manual reporting time by 30% by developing automated HR analytics \
             dashboards in Power BI and Excel."
                .to_string(),
            "Improved HR decision-making speed by 25% by integrating real-time datasets and \
             defining actionable KPIs."
                .to_string(),
            "Designed and implemented KPIs to track employee satisfaction, leading to a 4% \
             reduction in turnover."
                .to_string(),
        ],
    }]
}

pub fn educations() -> Vec<Education> {
    vec![Education {
        id: 0,
        degree: "Bachelor of Engineering (CSE)".to_string(),
        school: "Agadi College of Engineering".to_string(),
        period: "2021 – 2025 | CGPA: 7.9".to_string(),
        description: "Focused on Data Analytics, Database Management, and AI.".to_string(),
    }]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 0,
            title: "HR Data Analytics Dashboard".to_string(),
            tech: vec!["Power BI".to_string(), "Excel".to_string(), "DAX".to_string()],
            description: vec![
                "Analyzed 7+ workforce metrics including attrition, hiring trends, promotions, \
                 and demographics."
                    .to_string(),
                "Automated Excel preprocessing (removing nulls, converting datatypes, merging \
                 sheets)."
                    .to_string(),
                "Designed DAX measures to calculate attrition %, average tenure, and engagement \
                 insights."
                    .to_string(),
            ],
            image: "https://picsum.photos/id/0/800/600".to_string(),
            link: "#".to_string(),
            github: Some("https://github.com".to_string()),
        },
        Project {
            id: 0,
            title: "Bank Loan Report Dashboard".to_string(),
            tech: vec![
                "MySQL".to_string(),
                "Power BI".to_string(),
                "SQL".to_string(),
            ],
            description: vec![
                "Cleaned and transformed 5,000+ financial records using SQL queries (joins, \
                 grouping, aggregates)."
                    .to_string(),
                "Built a Power BI dashboard showing loan approval trends, repayment behavior, \
                 and KPI comparisons."
                    .to_string(),
                "Segmented loans into Good vs Bad categories using DTI ratio and credit \
                 indicators."
                    .to_string(),
            ],
            image: "https://picsum.photos/id/20/800/600".to_string(),
            link: "#".to_string(),
            github: Some("https://github.com".to_string()),
        },
    ]
}

pub fn certifications() -> Vec<Certification> {
    vec![
        Certification {
            id: 0,
            name: "Python Programming".to_string(),
            issuer: "Geeks for Geeks".to_string(),
            year: "2025".to_string(),
            link: Some("https://www.geeksforgeeks.org/".to_string()),
            image: Some(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c3/Python-logo-notext.svg/1200px-Python-logo-notext.svg.png"
                    .to_string(),
            ),
        },
        Certification {
            id: 0,
            name: "Data Analytics Job Simulation".to_string(),
            issuer: "Deloitte".to_string(),
            year: "2025".to_string(),
            link: Some("https://www.theforage.com/".to_string()),
            image: Some(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/5/56/Deloitte.svg/1200px-Deloitte.svg.png"
                    .to_string(),
            ),
        },
        Certification {
            id: 0,
            name: "Gen AI-Powered Data Analytics Simulation".to_string(),
            issuer: "Tata".to_string(),
            year: "2025".to_string(),
            link: Some("https://www.tata.com/".to_string()),
            image: Some(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/8/8e/Tata_logo.svg/1200px-Tata_logo.svg.png"
                    .to_string(),
            ),
        },
    ]
}

/// The store a fresh process starts from.
pub fn content_store() -> ContentStore {
    ContentStore {
        profile: profile(),
        skills: Collection::seeded(skills()),
        experiences: Collection::seeded(experiences()),
        educations: Collection::seeded(educations()),
        projects: Collection::seeded(projects()),
        certifications: Collection::seeded(certifications()),
    }
}
