//! Robots.txt rule collection
//!
//! Line-oriented parsing of a robots.txt body into the set of disallowed
//! path prefixes that apply to one agent identity. Known simplifications,
//! kept on purpose:
//! - no `Allow`, `Crawl-delay`, wildcard patterns, or sitemap directives;
//! - a literal `Disallow: /` (bare root) is exempted from blocking, so a
//!   site-wide disallow is not honored by this interpreter.

/// Disallow-path prefixes collected for one agent from one robots.txt body
///
/// Built freshly per check; never cached or shared across calls.
#[derive(Debug, Clone)]
pub struct RobotsRuleSet {
    disallow: Vec<String>,
}

impl RobotsRuleSet {
    /// Parses a robots.txt body, collecting the rules that apply to `agent`
    ///
    /// Blank lines and `#` comments are skipped. Each remaining line splits
    /// on its first `:` into a directive and a value; directive keys are
    /// case-insensitive. A `user-agent` line opens or closes collection:
    /// rules apply while the most recent `user-agent` value is `*` or equals
    /// `agent` case-insensitively. Only non-empty `disallow` values seen
    /// while collection is open are kept.
    pub fn parse(body: &str, agent: &str) -> Self {
        let mut disallow = Vec::new();
        let mut active = false;

        for line in body.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_ascii_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    active = value == "*" || value.eq_ignore_ascii_case(agent);
                }
                "disallow" => {
                    if active && !value.is_empty() {
                        disallow.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        Self { disallow }
    }

    /// Checks a URL path against the collected prefixes
    ///
    /// Disallowed iff the path starts with any collected prefix other than
    /// the bare root `/` (see module docs for that exemption).
    pub fn is_disallowed(&self, path: &str) -> bool {
        self.disallow
            .iter()
            .any(|prefix| prefix != "/" && path.starts_with(prefix.as_str()))
    }

    /// Returns the collected disallow prefixes
    pub fn disallowed_prefixes(&self) -> &[String] {
        &self.disallow
    }
}
