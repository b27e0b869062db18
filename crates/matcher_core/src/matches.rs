/// One job suggestion, rendered read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct JobMatch {
    pub company: String,
    pub role: String,
    pub description: String,
    pub apply_link: String,
    /// Expected in `[0, 1]`.
    pub similarity: f64,
}

impl JobMatch {
    pub fn new(
        company: impl Into<String>,
        role: impl Into<String>,
        description: impl Into<String>,
        apply_link: impl Into<String>,
        similarity: f64,
    ) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            description: description.into(),
            apply_link: apply_link.into(),
            similarity,
        }
    }
}

const ROUNDING_EPSILON: f64 = 1e-9;

/// Similarity as an integer percentage, rounding half up.
///
/// A tiny epsilon absorbs binary noise such as
/// `0.885 * 100 == 88.49999999999999`, which must still round to 89.
pub fn match_percentage(similarity: f64) -> u8 {
    if !similarity.is_finite() {
        return 0;
    }
    let percent = similarity.clamp(0.0, 1.0) * 100.0;
    (percent + 0.5 + ROUNDING_EPSILON).floor().min(100.0) as u8
}

pub fn match_label(similarity: f64) -> String {
    format!("{}% Match", match_percentage(similarity))
}

/// Fixed result set shown when an analysis fails and the page falls back to demo data.
pub fn demo_matches() -> Vec<JobMatch> {
    vec![
        JobMatch::new(
            "TechCorp Solutions",
            "Senior Software Engineer",
            "We are looking for a passionate Senior Software Engineer to join our dynamic team. \
             You will be responsible for developing scalable web applications, mentoring junior \
             developers, and contributing to architectural decisions. Experience with React, \
             Node.js, and cloud technologies is highly valued.",
            "https://example.com/job1",
            0.92,
        ),
        JobMatch::new(
            "DataFlow Analytics",
            "Full Stack Developer",
            "Join our innovative team as a Full Stack Developer where you'll work on cutting-edge \
             data visualization tools. We need someone proficient in modern JavaScript frameworks, \
             Python, and database design. Great opportunity for career growth in a fast-paced \
             environment.",
            "https://example.com/job2",
            0.88,
        ),
        JobMatch::new(
            "CloudTech Innovations",
            "DevOps Engineer",
            "We're seeking a skilled DevOps Engineer to help us scale our cloud infrastructure. \
             You'll work with Docker, Kubernetes, AWS, and CI/CD pipelines. Perfect role for \
             someone who loves automation and wants to work with the latest cloud technologies.",
            "https://example.com/job3",
            0.85,
        ),
        JobMatch::new(
            "StartupHub Inc",
            "Frontend Developer",
            "Exciting opportunity for a Frontend Developer to shape the user experience of our \
             next-generation platform. We use React, TypeScript, and modern CSS frameworks. \
             You'll collaborate closely with designers and backend developers in an agile environment.",
            "https://example.com/job4",
            0.82,
        ),
        JobMatch::new(
            "Enterprise Solutions Ltd",
            "Software Architect",
            "Lead the technical direction as a Software Architect in our enterprise solutions team. \
             You'll design system architectures, evaluate technologies, and guide development teams. \
             Strong background in microservices, distributed systems, and team leadership required.",
            "https://example.com/job5",
            0.79,
        ),
    ]
}
