/// Maps string labels to dense class indices (sorted label order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit(labels: &[String]) -> Self {
        let mut classes = labels.to_vec();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
    }

    /// Encodes every label; `None` if any label was not seen by [`fit`](Self::fit).
    pub fn encode_all(&self, labels: &[String]) -> Option<Vec<usize>> {
        labels.iter().map(|l| self.encode(l)).collect()
    }

    pub fn decode(&self, class: usize) -> &str {
        &self.classes[class]
    }
}
