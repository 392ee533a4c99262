use super::cards_types::Card;

/// Centralized helper for parsing hardcoded card tokens in fixtures and demo data.
pub struct CardFixtures;

impl CardFixtures {
    /// Parse hardcoded card tokens (e.g. `["CJ", "ST", "H7"]`).
    ///
    /// Only for tokens known to be valid; panics otherwise.
    pub fn parse_hardcoded(tokens: &[&str]) -> Vec<Card> {
        tokens
            .iter()
            .map(|s| {
                #[allow(clippy::expect_used)]
                s.parse::<Card>().expect("hardcoded valid card token")
            })
            .collect()
    }

    pub fn card(token: &str) -> Card {
        #[allow(clippy::expect_used)]
        token.parse::<Card>().expect("hardcoded valid card token")
    }
}
