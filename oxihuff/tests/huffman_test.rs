//! Comprehensive Huffman integration tests.

use oxihuff::{
    ByteFrequency, CodeTable, HuffmanConfig, HuffmanDecoder, HuffmanEncoder, HuffmanTree,
    OxiHuffError, compress, compress_bytes, decompress, decompress_bytes, deserialize_tree,
    serialize_tree,
};

fn roundtrip(original: &[u8]) {
    let compressed = compress_bytes(original).expect("compression failed");
    let decompressed = decompress_bytes(&compressed).expect("decompression failed");
    assert_eq!(decompressed.len(), original.len());
    assert_eq!(decompressed, original);
}

fn pseudo_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

// ============================================================================
// Round-trip
// ============================================================================

#[test]
fn test_huffman_roundtrip_text() {
    roundtrip(b"The quick brown fox jumps over the lazy dog.");
    roundtrip(&b"Pack my box with five dozen liquor jugs. ".repeat(100));
}

#[test]
fn test_huffman_roundtrip_single_repeated_byte() {
    roundtrip(b"X");
    roundtrip(b"XXX");
    roundtrip(&[0u8; 4096]);
    roundtrip(&[0xFFu8; 17]);
}

#[test]
fn test_huffman_roundtrip_all_byte_values() {
    let original: Vec<u8> = (0..=255).collect();
    roundtrip(&original);

    let mut reversed = original.clone();
    reversed.reverse();
    roundtrip(&reversed.repeat(3));
}

#[test]
fn test_huffman_roundtrip_skewed() {
    // Fibonacci-like weights give the deepest possible trees.
    let mut original = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0u8..20 {
        original.extend(std::iter::repeat_n(symbol, a));
        (a, b) = (b, a + b);
    }
    roundtrip(&original);

    let tree = HuffmanTree::build(&ByteFrequency::from_bytes(&original)).unwrap();
    assert_eq!(tree.depth(), 19);
}

#[test]
fn test_huffman_roundtrip_random() {
    for size in [1, 2, 7, 8, 9, 255, 1000, 65_537] {
        roundtrip(&pseudo_random(size));
    }
}

#[test]
fn test_huffman_roundtrip_two_symbols_every_length() {
    // Exercises every padding width of the final byte.
    for len in 1..=40 {
        let original: Vec<u8> = (0..len).map(|i| if i % 3 == 0 { b'a' } else { b'b' }).collect();
        roundtrip(&original);
    }
}

#[test]
fn test_huffman_stream_api() {
    let original = b"streams in, streams out".repeat(10);
    let mut artifact = Vec::new();
    let report = compress(&original[..], &mut artifact).expect("compression failed");
    assert_eq!(report.compressed_size, artifact.len() as u64);

    let mut restored = Vec::new();
    let report = decompress(&artifact[..], &mut restored).expect("decompression failed");
    assert_eq!(report.decompressed_size, original.len() as u64);
    assert_eq!(restored, original);
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_huffman_aaabbc_code_lengths() {
    let freq = ByteFrequency::from_bytes(b"AAABBC");
    assert_eq!(freq.count(b'A'), 3);
    assert_eq!(freq.count(b'B'), 2);
    assert_eq!(freq.count(b'C'), 1);

    let tree = HuffmanTree::build(&freq).unwrap();
    let table = CodeTable::from_tree(&tree).unwrap();
    assert_eq!(table.get(b'A').unwrap().len(), 1);
    assert_eq!(table.get(b'C').unwrap().len(), 2);
    assert!(table.get(b'B').unwrap().len() <= 2);

    roundtrip(b"AAABBC");
}

#[test]
fn test_huffman_amortized_header() {
    let original = b"AAABBC".repeat(200);
    let compressed = compress_bytes(&original).unwrap();

    println!("Original size: {} bytes", original.len());
    println!("Compressed size: {} bytes", compressed.len());
    println!(
        "Compression ratio: {:.2}%",
        (compressed.len() as f64 / original.len() as f64) * 100.0
    );

    // 1.5 bits per byte on average
    assert!(compressed.len() < original.len() / 4);
}

#[test]
fn test_huffman_single_symbol_scenario() {
    let compressed = compress_bytes(&[0x58, 0x58, 0x58]).unwrap();
    assert_eq!(decompress_bytes(&compressed).unwrap(), vec![0x58, 0x58, 0x58]);
}

#[test]
fn test_huffman_empty_input_rejected() {
    let mut artifact = Vec::new();
    let err = compress(&b""[..], &mut artifact).unwrap_err();
    assert!(matches!(err, OxiHuffError::EmptyInput));
    assert!(artifact.is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_huffman_prefix_free() {
    for data in [
        pseudo_random(5000),
        b"mississippi".to_vec(),
        (0..=255).collect::<Vec<u8>>(),
    ] {
        let tree = HuffmanTree::build(&ByteFrequency::from_bytes(&data)).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        let codes: Vec<_> = table.iter().map(|(_, code)| code.clone()).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }
}

#[test]
fn test_huffman_tree_serialization_roundtrip() {
    for data in [pseudo_random(3000), b"XXX".to_vec(), b"ab".to_vec()] {
        let tree = HuffmanTree::build(&ByteFrequency::from_bytes(&data)).unwrap();
        let bytes = serialize_tree(&tree).unwrap();
        let (decoded, consumed) = deserialize_tree(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded, tree);
    }
}

#[test]
fn test_huffman_deterministic() {
    let data = pseudo_random(10_000);
    let first = compress_bytes(&data).unwrap();
    for _ in 0..3 {
        assert_eq!(compress_bytes(&data).unwrap(), first);
    }
}

#[test]
fn test_huffman_optimal_length() {
    // Huffman never needs more than 8 bits per byte on average.
    let data = pseudo_random(20_000);
    let freq = ByteFrequency::from_bytes(&data);
    let tree = HuffmanTree::build(&freq).unwrap();
    let table = CodeTable::from_tree(&tree).unwrap();
    assert!(table.encoded_bits(&freq) <= freq.total() * 8);
}

// ============================================================================
// Legacy layout
// ============================================================================

#[test]
fn test_huffman_legacy_layout_bytes() {
    // Legacy artifacts are tree, '|', packed bits; nothing else.
    let artifact = HuffmanEncoder::new(HuffmanConfig::LEGACY)
        .encode_bytes(b"AB")
        .unwrap();
    assert_eq!(artifact, vec![b'0', b'1', b'A', b'1', b'B', b'|', 0b0100_0000]);

    let counted = compress_bytes(b"AB").unwrap();
    assert_eq!(counted.len(), artifact.len() + 8);
}

#[test]
fn test_huffman_legacy_roundtrip_on_byte_boundary() {
    // 16 symbols * 1 bit = 2 full bytes, so no padding is decoded.
    let original = b"ABBAABBAABBAABBA";
    let artifact = HuffmanEncoder::new(HuffmanConfig::LEGACY)
        .encode_bytes(original)
        .unwrap();
    let restored = HuffmanDecoder::new(HuffmanConfig::LEGACY)
        .decode_bytes(&artifact)
        .unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_huffman_legacy_padding_ambiguity() {
    // Known limitation of the legacy layout: 3 bits of data, 5 of padding.
    let original = b"AAB";
    let artifact = HuffmanEncoder::new(HuffmanConfig::LEGACY)
        .encode_bytes(original)
        .unwrap();
    let restored = HuffmanDecoder::new(HuffmanConfig::LEGACY)
        .decode_bytes(&artifact)
        .unwrap();
    assert_ne!(restored, original);
    assert!(restored.starts_with(original));

    // The counted layout is exact.
    assert_eq!(decompress_bytes(&compress_bytes(original).unwrap()).unwrap(), original);
}
