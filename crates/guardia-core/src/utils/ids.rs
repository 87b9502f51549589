/// Per-import id generator. A single counter is shared by every prefix, so
/// ids are unique across the whole result and stable across re-imports of
/// the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    issued: u32,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> String {
        self.issued += 1;
        format!("{}-{}", prefix, self.issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_prefixes() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.next("svc"), "svc-1");
        assert_eq!(ids.next("asg"), "asg-2");
        assert_eq!(ids.next("svc"), "svc-3");
    }
}
