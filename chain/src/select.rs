//! CA selection policy.

use crate::decode::DecodedBlock;

/// Filter decoded blocks down to the certificates worth republishing.
///
/// When `check_ca` is false every block in the chain is trusted and retained
/// regardless of CA status; when true only blocks whose certificate
/// self-identifies as a CA survive. Ordering is preserved and duplicate
/// certificates are not collapsed.
pub fn select_chain<I>(blocks: I, check_ca: bool) -> impl Iterator<Item = String>
where
    I: Iterator<Item = DecodedBlock>,
{
    blocks
        .filter(move |block| block.is_ca || !check_ca)
        .map(|block| block.pem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(pem: &str, is_ca: bool) -> DecodedBlock {
        DecodedBlock {
            pem: pem.to_owned(),
            is_ca,
        }
    }

    #[test]
    fn trust_everything_when_check_ca_disabled() {
        let blocks = vec![block("leaf", false), block("root", true)];
        let retained: Vec<String> = select_chain(blocks.into_iter(), false).collect();
        assert_eq!(retained, vec!["leaf", "root"], "order must be preserved");
    }

    #[test]
    fn only_ca_blocks_when_check_ca_enabled() {
        let blocks = vec![
            block("leaf", false),
            block("intermediate", true),
            block("root", true),
        ];
        let retained: Vec<String> = select_chain(blocks.into_iter(), true).collect();
        assert_eq!(retained, vec!["intermediate", "root"]);
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let blocks = vec![block("root", true), block("root", true)];
        let retained: Vec<String> = select_chain(blocks.into_iter(), true).collect();
        assert_eq!(retained.len(), 2);
    }
}
