//! Tolerant decoding of concatenated PEM certificate blocks.

use pem::{EncodeConfig, LineEnding};
use tracing::trace;
use x509_parser::certificate::X509Certificate;
use x509_parser::parse_x509_certificate;
use x509_parser::pem::Pem;

/// One successfully parsed certificate block from a chain payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    /// Canonical PEM text of the block: original label, 64-column base64,
    /// LF line endings, no trailing newline.
    pub pem: String,
    /// Whether the certificate's basic constraints mark it as a CA.
    pub is_ca: bool,
}

/// Decode zero or more concatenated PEM blocks from `payload`.
///
/// Decoding stops at the first position where no further PEM block can be
/// read; an empty or malformed remainder ends the sequence without error.
/// Blocks whose DER content does not parse as an X.509 certificate are
/// dropped and the rest of the chain keeps processing. Source ordering is
/// preserved.
pub fn decode_chain(payload: &[u8]) -> impl Iterator<Item = DecodedBlock> + '_ {
    Pem::iter_from_buffer(payload)
        .map_while(|block| block.ok())
        .filter_map(classify)
}

fn classify(block: Pem) -> Option<DecodedBlock> {
    let cert = match parse_x509_certificate(&block.contents) {
        Ok((_, cert)) => cert,
        Err(err) => {
            trace!(
                label = %block.label,
                error = %err,
                "dropping chain block that is not a parseable certificate"
            );
            return None;
        }
    };
    let is_ca = is_certificate_authority(&cert);

    Some(DecodedBlock {
        pem: canonical_pem(&block),
        is_ca,
    })
}

/// A certificate counts as a CA only when its basic-constraints extension is
/// present, decodable and asserts the CA flag. An absent or undecodable
/// extension classifies as not-a-CA.
fn is_certificate_authority(cert: &X509Certificate<'_>) -> bool {
    match cert.basic_constraints() {
        Ok(Some(constraints)) => constraints.value.ca,
        _ => false,
    }
}

fn canonical_pem(block: &Pem) -> String {
    let text = pem::encode_config(
        &pem::Pem::new(block.label.clone(), block.contents.clone()),
        EncodeConfig::default().set_line_ending(LineEnding::LF),
    );
    text.trim_end().to_owned()
}
