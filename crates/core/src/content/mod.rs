//! Static presentation data for the page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub short_name: &'static str,
    pub role: &'static str,
    pub summary: &'static str,
    pub call_to_action: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatItem {
    pub target: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillCategory {
    pub category: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExperienceEntry {
    pub title: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContactChannel {
    pub title: &'static str,
    pub label: &'static str,
    pub href: &'static str,
    /// Opens in a new tab.
    pub external: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Ishan Chandra Joshi",
    short_name: "Ishan Joshi",
    role: "Machine Learning Engineer",
    summary: "Passionate about analyzing complex datasets to drive intelligent decision-making and automation. Currently working at AVL India, building cutting-edge ML solutions.",
    call_to_action: "Get In Touch",
};

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I'm a passionate Machine Learning Engineer currently working at AVL India, where I apply cutting-edge AI technologies to solve complex real-world problems. With a strong foundation in Python, SQL, and various ML frameworks, I specialize in developing intelligent systems that drive automation and decision-making.",
    "My journey in technology has been marked by innovative projects ranging from faulty bearing detection systems to smart road safety management solutions. I believe in the power of data-driven insights and am constantly exploring new ways to leverage machine learning for impactful solutions.",
    "When I'm not coding, you'll find me exploring the latest developments in AI, contributing to open-source projects, or sharing knowledge with the developer community.",
];

pub const STATS: &[StatItem] = &[
    StatItem {
        target: 3,
        suffix: "+",
        label: "Major Projects",
    },
    StatItem {
        target: 7,
        suffix: "+",
        label: "Certifications",
    },
    StatItem {
        target: 1,
        suffix: "",
        label: "Current Role",
    },
    StatItem {
        target: 4,
        suffix: "th",
        label: "Hackathon Ranking",
    },
];

pub const SKILLS: &[SkillCategory] = &[
    SkillCategory {
        category: "Programming Languages",
        tags: &["Python", "MySQL", "JavaScript", "HTML", "CSS"],
    },
    SkillCategory {
        category: "Machine Learning & AI",
        tags: &[
            "Supervised Learning",
            "Computer Vision",
            "Deep Learning",
            "Data Analysis",
            "NLP",
        ],
    },
    SkillCategory {
        category: "Libraries & Frameworks",
        tags: &[
            "Pandas",
            "NumPy",
            "Scikit-learn",
            "OpenCV",
            "Matplotlib",
            "Seaborn",
            "Flask",
            "Ultralytics",
        ],
    },
    SkillCategory {
        category: "Tools & Platforms",
        tags: &[
            "Git",
            "Jupyter Notebook",
            "Google Colab",
            "Power BI",
            "Excel",
            "Linux",
            "Windows",
        ],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "BearMath",
        kind: "Final Year Project • Ongoing",
        description: "Developed a faulty bearing detection system using YOLO for accurate and efficient object detection. Integrated multiple technologies for seamless deployment and real-time monitoring.",
        tech: &["Python", "OpenCV", "YOLO", "Flask", "Ultralytics"],
    },
    Project {
        title: "Vigil Eye",
        kind: "Learning Project • 2024",
        description: "Smart Road Safety Management system using ML-based accident detection from CCTV footage. Automatically alerts authorities in real-time and analyzes traffic patterns to enhance road safety.",
        tech: &["Python", "OpenCV", "Ultralytics", "Machine Learning"],
    },
    Project {
        title: "Eyeris",
        kind: "Learning Project • 2024",
        description: "Iris-Based Cursor Control system using deep learning for hands-free cursor control. Enhances accessibility and transforms gaming and virtual reality experiences through eye-tracking technology.",
        tech: &[
            "Deep Learning",
            "Computer Vision",
            "Eye Tracking",
            "Real-time Processing",
        ],
    },
];

pub const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        title: "Machine Learning Engineer",
        company: "AVL India",
        period: "Current Position",
        description: "Working on cutting-edge machine learning solutions and AI-driven automation systems. Developing and implementing ML models for complex engineering challenges, contributing to innovative projects that drive technological advancement in the automotive industry.",
    },
    ExperienceEntry {
        title: "B.Tech. Information Technology",
        company: "Meerut Institute of Engineering and Technology",
        period: "2021 - 2025",
        description: "Specializing in Machine Learning and Data Science. Achieved multiple recognitions including 4th rank in \"Dev Gathering'24\" Hackathon and College Topper in \"CodeXcelerate: Unleashing the Ninjas\" Competition.",
    },
];

pub const CONTACT_INTRO: &str = "Ready to discuss your next ML project or explore collaboration opportunities? I'd love to hear from you!";

pub const CONTACTS: &[ContactChannel] = &[
    ContactChannel {
        title: "Email",
        label: "ishanjoshi.official@gmail.com",
        href: "mailto:ishanjoshi.official@gmail.com",
        external: false,
    },
    ContactChannel {
        title: "Phone",
        label: "+91-9079638779",
        href: "tel:+919079638779",
        external: false,
    },
    ContactChannel {
        title: "LinkedIn",
        label: "ishan-chandra-joshi",
        href: "https://linkedin.com/in/ishan-chandra-joshi/",
        external: true,
    },
    ContactChannel {
        title: "GitHub",
        label: "ishanjoshi242",
        href: "https://github.com/ishanjoshi242",
        external: true,
    },
];

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        label: "Home",
        anchor: "home",
    },
    NavLink {
        label: "About",
        anchor: "about",
    },
    NavLink {
        label: "Skills",
        anchor: "skills",
    },
    NavLink {
        label: "Projects",
        anchor: "projects",
    },
    NavLink {
        label: "Experience",
        anchor: "experience",
    },
    NavLink {
        label: "Contact",
        anchor: "contact",
    },
];

/// Footer line for the given year.
pub fn copyright(year: i32) -> String {
    format!("© {year} {}. All rights reserved.", PROFILE.name)
}

/// Everything above bundled for serialisation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContentBundle {
    pub profile: Profile,
    pub about: &'static [&'static str],
    pub stats: &'static [StatItem],
    pub skills: &'static [SkillCategory],
    pub projects: &'static [Project],
    pub experience: &'static [ExperienceEntry],
    pub contact_intro: &'static str,
    pub contacts: &'static [ContactChannel],
    pub nav: &'static [NavLink],
}

pub fn bundle() -> ContentBundle {
    ContentBundle {
        profile: PROFILE,
        about: ABOUT_PARAGRAPHS,
        stats: STATS,
        skills: SKILLS,
        projects: PROJECTS,
        experience: EXPERIENCE,
        contact_intro: CONTACT_INTRO,
        contacts: CONTACTS,
        nav: NAV_LINKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_match_about_section() {
        let targets: Vec<u32> = STATS.iter().map(|stat| stat.target).collect();
        assert_eq!(targets, vec![3, 7, 1, 4]);
    }

    #[test]
    fn nav_anchors_are_unique() {
        let mut anchors: Vec<&str> = NAV_LINKS.iter().map(|link| link.anchor).collect();
        anchors.sort_unstable();
        anchors.dedup();
        assert_eq!(anchors.len(), NAV_LINKS.len());
    }

    #[test]
    fn bundle_serialises() {
        let json = serde_json::to_value(bundle()).unwrap();
        assert_eq!(json["profile"]["role"], "Machine Learning Engineer");
        assert_eq!(json["skills"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn copyright_names_owner() {
        assert_eq!(
            copyright(2026),
            "© 2026 Ishan Chandra Joshi. All rights reserved."
        );
    }
}
