// src/robots/rules.rs
// =============================================================================
// Parses the wildcard group of a robots.txt file.
//
// Example:
//   User-agent: googlebot
//   Disallow: /only-google-cares
//
//   User-agent: *
//   Disallow: /private
//   Disallow: /tmp/      # comments are ignored
//
// gives the disallow list ["/private", "/tmp/"].
//
// Matching is case-sensitive on the field names and a plain prefix test on
// the path, nothing more.
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    disallow: Vec<String>,
}

impl RobotsRules {
    /// Rules that forbid nothing (no robots.txt, or one we couldn't read).
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn parse(body: &str) -> Self {
        let mut disallow = Vec::new();
        // Does the group we are inside apply to `*`?
        let mut in_wildcard_group = false;
        // Consecutive User-agent lines share one group
        let mut reading_agents = false;

        for raw in body.lines() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            if let Some(agent) = line.strip_prefix("User-agent:") {
                let wildcard = agent.trim() == "*";
                in_wildcard_group = wildcard || (reading_agents && in_wildcard_group);
                reading_agents = true;
                continue;
            }
            reading_agents = false;

            if !in_wildcard_group {
                continue;
            }
            if let Some(prefix) = line.strip_prefix("Disallow:") {
                let prefix = prefix.trim();
                // An empty Disallow means "nothing is disallowed"
                if !prefix.is_empty() {
                    disallow.push(prefix.to_string());
                }
            }
        }

        Self { disallow }
    }

    pub fn allows(&self, path: &str) -> bool {
        !self.disallow.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn disallowed_prefixes(&self) -> &[String] {
        &self.disallow
    }
}
