use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::holding::Holding;
use super::settings::Settings;

/// The main data container: the flat list of purchase lots plus user
/// settings. Lots are kept in insertion order and never mutated in
/// place; an import replaces the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// All purchase lots, oldest-added first
    pub holdings: Vec<Holding>,

    /// User settings (display currency, API keys)
    pub settings: Settings,
}

impl Portfolio {
    /// Append one lot at the end of the store.
    pub fn append_holding(&mut self, holding: Holding) {
        self.holdings.push(holding);
    }

    /// Replace the entire store (bulk import).
    pub fn replace_holdings(&mut self, holdings: Vec<Holding>) {
        self.holdings = holdings;
    }

    /// Group lots by symbol.
    ///
    /// Groups appear in first-seen symbol order, and each group keeps
    /// its lots in insertion order. The first lot of a group is the
    /// "representative" one: its category and purchase date end up on
    /// the position snapshot, so this ordering is load-bearing.
    #[must_use]
    pub fn grouped_by_symbol(&self) -> Vec<(String, Vec<&Holding>)> {
        let mut groups: Vec<(String, Vec<&Holding>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for holding in &self.holdings {
            match index.get(holding.symbol.as_str()) {
                Some(&i) => groups[i].1.push(holding),
                None => {
                    index.insert(holding.symbol.as_str(), groups.len());
                    groups.push((holding.symbol.clone(), vec![holding]));
                }
            }
        }

        groups
    }
}
