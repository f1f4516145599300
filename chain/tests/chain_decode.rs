//! Parser and selection-policy properties over runtime-generated certificates.

use certwatch_chain::{decode_chain, select_chain, DecodedBlock};
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};

/// Structurally valid PEM whose DER content is not a certificate.
const BOGUS_BLOCK: &str = "-----BEGIN CERTIFICATE-----\nMIIBogus0000\n-----END CERTIFICATE-----\n";

fn ca_pem() -> String {
    let mut params = CertificateParams::new(Vec::default()).expect("CA params");
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "certwatch test CA");
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().expect("CA key pair");
    params.self_signed(&key_pair).expect("CA certificate").pem()
}

fn leaf_pem() -> String {
    let params =
        CertificateParams::new(vec!["localhost".to_string()]).expect("leaf params");
    let key_pair = KeyPair::generate().expect("leaf key pair");
    params
        .self_signed(&key_pair)
        .expect("leaf certificate")
        .pem()
}

fn concat(first: &str, second: &str) -> String {
    format!("{}\n{}", first.trim_end(), second)
}

#[test]
fn empty_payload_decodes_to_nothing() {
    assert_eq!(decode_chain(b"").count(), 0);
}

#[test]
fn garbage_payload_decodes_to_nothing() {
    assert_eq!(decode_chain(b"this is not pem at all").count(), 0);
}

#[test]
fn chain_order_and_classification_are_preserved() {
    let payload = concat(&leaf_pem(), &ca_pem());
    let blocks: Vec<DecodedBlock> = decode_chain(payload.as_bytes()).collect();

    assert_eq!(blocks.len(), 2, "both blocks should decode");
    assert!(!blocks[0].is_ca, "leaf must come first and not be a CA");
    assert!(blocks[1].is_ca, "CA must keep its source position");
}

#[test]
fn decoded_text_is_canonical() {
    let payload = ca_pem();
    let block = decode_chain(payload.as_bytes())
        .next()
        .expect("one decoded block");

    assert!(block.pem.starts_with("-----BEGIN CERTIFICATE-----"));
    assert!(block.pem.ends_with("-----END CERTIFICATE-----"));
    assert!(
        !block.pem.contains('\r'),
        "canonical text uses LF line endings"
    );
}

#[test]
fn malformed_block_is_dropped_without_aborting_the_chain() {
    let payload = concat(BOGUS_BLOCK, &ca_pem());
    let blocks: Vec<DecodedBlock> = decode_chain(payload.as_bytes()).collect();

    assert_eq!(blocks.len(), 1, "only the valid block should survive");
    assert!(blocks[0].is_ca);
}

#[test]
fn selection_with_check_ca_disabled_retains_everything() {
    let payload = concat(&leaf_pem(), &ca_pem());
    let all: Vec<DecodedBlock> = decode_chain(payload.as_bytes()).collect();
    let retained: Vec<String> = select_chain(decode_chain(payload.as_bytes()), false).collect();

    assert_eq!(retained.len(), all.len());
    for (text, block) in retained.iter().zip(&all) {
        assert_eq!(text, &block.pem);
    }
}

#[test]
fn selection_with_check_ca_enabled_keeps_only_ca_blocks() {
    let payload = concat(&leaf_pem(), &ca_pem());
    let retained: Vec<String> = select_chain(decode_chain(payload.as_bytes()), true).collect();

    assert_eq!(retained.len(), 1);

    let block = decode_chain(retained[0].as_bytes())
        .next()
        .expect("retained text decodes back");
    assert!(block.is_ca);
}

#[test]
fn leaf_only_chain_selects_to_nothing_under_check_ca() {
    let payload = leaf_pem();
    assert_eq!(
        select_chain(decode_chain(payload.as_bytes()), true).count(),
        0
    );
}

#[test]
fn duplicate_certificates_are_retained_twice() {
    let ca = ca_pem();
    let payload = concat(&ca, &ca);
    let retained: Vec<String> = select_chain(decode_chain(payload.as_bytes()), true).collect();

    assert_eq!(retained.len(), 2);
    assert_eq!(retained[0], retained[1]);
}

#[test]
fn joined_bundle_round_trips_to_the_same_texts() {
    let payload = concat(&leaf_pem(), &ca_pem());
    let texts: Vec<String> = select_chain(decode_chain(payload.as_bytes()), false).collect();

    let joined = texts.join("\n");
    let reparsed: Vec<String> = decode_chain(joined.as_bytes())
        .map(|block| block.pem)
        .collect();

    assert_eq!(reparsed, texts);
}
