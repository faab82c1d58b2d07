// src/robots/mod.rs
// =============================================================================
// A deliberately small robots.txt implementation.
//
// Supported: the `User-agent: *` group and its `Disallow:` path prefixes.
// Not supported: Allow lines, wildcards, Crawl-delay, agent-specific groups.
//
// Submodules:
// - rules: parsing a robots.txt body into a list of forbidden prefixes
// - policy: fetching robots.txt for an origin and answering "may I?"
// =============================================================================

mod policy;
mod rules;

pub use policy::RobotsPolicy;
pub use rules::RobotsRules;
