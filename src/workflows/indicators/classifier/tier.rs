use crate::workflows::indicators::domain::Tier;

/// Every group must be satisfied by at least one of its keywords.
struct TierRule {
    tier: Tier,
    groups: &'static [&'static [&'static str]],
}

const TIER_RULES: &[TierRule] = &[
    TierRule {
        tier: Tier::Foundational,
        groups: &[&["staff"], &["turnover"]],
    },
    TierRule {
        tier: Tier::Foundational,
        groups: &[&["funding"], &["core", "ratio"]],
    },
    TierRule {
        tier: Tier::Foundational,
        groups: &[&["board"], &["meeting"]],
    },
    TierRule {
        tier: Tier::Operational,
        groups: &[&["collaboration", "coalition"]],
    },
    TierRule {
        tier: Tier::Operational,
        groups: &[&["satisfaction", "feedback"]],
    },
    TierRule {
        tier: Tier::Operational,
        groups: &[&["training", "professional development", "professional-development"]],
    },
    TierRule {
        tier: Tier::Strategic,
        groups: &[&["outcome", "impact"]],
    },
    TierRule {
        tier: Tier::Strategic,
        groups: &[&["policy", "advocacy"]],
    },
    TierRule {
        tier: Tier::Strategic,
        groups: &[&["leadership", "governance"]],
    },
];

impl TierRule {
    fn matches(&self, text: &str) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|keyword| text.contains(keyword)))
    }
}

/// Importance tier from the combined indicator and method text. Unmatched text is tier 2.
pub fn classify_tier(indicator_text: &str, method_text: &str) -> Tier {
    let text = format!("{indicator_text} {method_text}").to_lowercase();
    TIER_RULES
        .iter()
        .find(|rule| rule.matches(&text))
        .map(|rule| rule.tier)
        .unwrap_or_default()
}
