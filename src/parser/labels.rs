use std::collections::HashMap;

/// Per-parse bookkeeping that keeps node labels unique.
///
/// The first claim of a base label returns it untouched; every later claim
/// of the same base label gets ` #n`, where `n` is the occurrence count.
#[derive(Debug, Default)]
pub struct LabelCounter {
    counts: HashMap<String, usize>,
}

impl LabelCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: String) -> String {
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{} #{}", base, count)
        }
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
