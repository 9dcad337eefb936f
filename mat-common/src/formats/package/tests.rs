use super::*;
use crate::enums::{BlendingMode, ShaderModel, ShaderType, TargetApi};
use crate::error::PackageError;
use crate::metadata::MaterialMetadata;
use crate::variant::{VARIANT_DIRECTIONAL_LIGHTING, VARIANT_SKINNING};

fn key(variant: u8, stage: ShaderType) -> ShaderKey {
    ShaderKey::new(ShaderModel::GlCore41, TargetApi::OpenGl, variant, stage)
}

fn sample_package() -> MaterialPackage {
    let metadata = MaterialMetadata {
        name: "sample".to_string(),
        blending: BlendingMode::Masked,
        mask_threshold: 0.6,
        ..Default::default()
    };
    let shaders = vec![
        PackedShader::new(
            key(0, ShaderType::Vertex),
            ShaderBlob::Text("#version 410 core\nvoid main() {}\n".to_string()),
        ),
        PackedShader::new(
            key(0, ShaderType::Fragment),
            ShaderBlob::Text("#version 410 core\nout vec4 c;\n".to_string()),
        ),
        PackedShader::new(
            ShaderKey::new(
                ShaderModel::GlCore41,
                TargetApi::Vulkan,
                VARIANT_DIRECTIONAL_LIGHTING,
                ShaderType::Fragment,
            ),
            ShaderBlob::Binary(vec![0x0723_0203, 0x0001_0000, 42]),
        ),
    ];
    MaterialPackage::new(metadata, shaders)
}

#[test]
fn test_header_layout() {
    let header = PackageHeader::new(7, 3);
    let bytes = header.to_bytes();
    assert_eq!(&bytes[0..4], b"NMAT");
    assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 1);
    assert_eq!(PackageHeader::from_bytes(&bytes), Some(header));
    assert!(PackageHeader::from_bytes(&bytes[..15]).is_none());
}

#[test]
fn test_entry_layout() {
    let entry = ShaderEntryHeader::new(
        key(VARIANT_SKINNING, ShaderType::Fragment),
        ShaderKind::Binary,
        128,
        64,
        0xDEAD_BEEF_0000_0001,
    );
    let bytes = entry.to_bytes();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[0..5], &[2, 1, 0x08, 1, 1]);
    assert_eq!(&bytes[5..8], &[0, 0, 0]);
    let parsed = ShaderEntryHeader::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, entry);
    assert_eq!(parsed.key(), Some(key(VARIANT_SKINNING, ShaderType::Fragment)));
}

#[test]
fn test_package_roundtrip() {
    let package = sample_package();
    let bytes = package.to_bytes().unwrap();
    let decoded = MaterialPackage::from_bytes(&bytes).unwrap();

    assert_eq!(decoded.metadata, package.metadata);
    assert_eq!(decoded.shaders(), package.shaders());
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
}

#[test]
fn test_find_shader() {
    let package = sample_package();
    assert_eq!(package.shader_count(), 3);
    assert!(
        package
            .text(&key(0, ShaderType::Vertex))
            .unwrap()
            .starts_with("#version 410 core")
    );
    assert!(package.text(&key(1, ShaderType::Vertex)).is_none());

    let vulkan = ShaderKey::new(
        ShaderModel::GlCore41,
        TargetApi::Vulkan,
        VARIANT_DIRECTIONAL_LIGHTING,
        ShaderType::Fragment,
    );
    assert_eq!(package.binary(&vulkan), Some(&[0x0723_0203, 0x0001_0000, 42][..]));
    assert!(package.text(&vulkan).is_none());
}

#[test]
fn test_reader_extracts_without_decoding_everything() {
    let package = sample_package();
    let bytes = package.to_bytes().unwrap();
    let reader = PackageReader::new(&bytes).unwrap();

    assert_eq!(reader.entry_count(), 3);
    for shader in package.shaders() {
        let entry = reader.entry(&shader.key).unwrap();
        assert_eq!(entry.kind, shader.kind());
        assert_eq!(reader.extract(&shader.key).unwrap(), shader.blob.to_bytes().as_slice());
    }
    assert_eq!(reader.metadata().unwrap().mask_threshold, 0.6);
}

#[test]
fn test_reader_missing_key() {
    let bytes = sample_package().to_bytes().unwrap();
    let reader = PackageReader::new(&bytes).unwrap();
    let missing = key(VARIANT_SKINNING, ShaderType::Vertex);
    assert!(matches!(reader.extract(&missing), Err(PackageError::NotFound(k)) if k == missing));
}

#[test]
fn test_reject_bad_magic() {
    let mut bytes = sample_package().to_bytes().unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        PackageReader::new(&bytes),
        Err(PackageError::InvalidMagic { .. })
    ));
}

#[test]
fn test_reject_unsupported_version() {
    let mut bytes = sample_package().to_bytes().unwrap();
    bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
    assert!(matches!(
        PackageReader::new(&bytes),
        Err(PackageError::UnsupportedVersion { found: 99, .. })
    ));
}

#[test]
fn test_reject_truncated() {
    let bytes = sample_package().to_bytes().unwrap();
    assert!(matches!(
        PackageReader::new(&bytes[..10]),
        Err(PackageError::Truncated { section: "header", .. })
    ));

    let metadata_len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let cut = PackageHeader::SIZE + metadata_len + 10;
    assert!(matches!(
        PackageReader::new(&bytes[..cut]),
        Err(PackageError::Truncated { section: "table of contents", .. })
    ));

    // Blob region shortened: last entry now points past the end
    assert!(matches!(
        PackageReader::new(&bytes[..bytes.len() - 1]),
        Err(PackageError::InvalidEntry { index: 2, .. })
    ));
}

#[test]
fn test_reject_duplicate_keys() {
    let mut package = sample_package();
    let first = package.shaders()[0].clone();
    package.push_shader(first);
    let bytes = package.to_bytes().unwrap();
    assert!(matches!(
        PackageReader::new(&bytes),
        Err(PackageError::DuplicateKey(k)) if k == key(0, ShaderType::Vertex)
    ));
}

#[test]
fn test_reject_unknown_enum_values() {
    let mut bytes = sample_package().to_bytes().unwrap();
    let metadata_len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
    let toc = PackageHeader::SIZE + metadata_len;

    // stage byte of the first entry
    bytes[toc + 3] = 9;
    assert!(matches!(
        PackageReader::new(&bytes),
        Err(PackageError::InvalidEntry { index: 0, .. })
    ));
}

#[test]
fn test_checksum_detects_corruption() {
    let mut bytes = sample_package().to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;

    let reader = PackageReader::new(&bytes).unwrap();
    let vulkan = ShaderKey::new(
        ShaderModel::GlCore41,
        TargetApi::Vulkan,
        VARIANT_DIRECTIONAL_LIGHTING,
        ShaderType::Fragment,
    );
    assert!(matches!(
        reader.extract(&vulkan),
        Err(PackageError::ChecksumMismatch(_))
    ));
    assert!(reader.extract(&key(0, ShaderType::Vertex)).is_ok());
    assert!(MaterialPackage::from_bytes(&bytes).is_err());
}

#[test]
fn test_empty_package() {
    let package = MaterialPackage::default();
    assert!(package.is_empty());
    let decoded = MaterialPackage::from_bytes(&package.to_bytes().unwrap()).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.metadata, MaterialMetadata::default());
}

#[test]
fn test_push_shader_refreshes_lookup() {
    let mut package = sample_package();
    let skinned = key(VARIANT_SKINNING, ShaderType::Vertex);
    assert!(package.find_shader(&skinned).is_none());

    package.push_shader(PackedShader::new(
        skinned,
        ShaderBlob::Text("#version 410 core\n".to_string()),
    ));
    assert_eq!(package.shader_count(), 4);
    assert_eq!(package.text(&skinned), Some("#version 410 core\n"));
    assert!(package.find_shader(&key(0, ShaderType::Vertex)).is_some());

    let (metadata, shaders) = package.into_parts();
    assert_eq!(metadata.name, "sample");
    assert_eq!(shaders.len(), 4);
}

#[test]
fn test_u32_fields_are_checked() {
    assert_eq!(checked_u32("shader blob", 0).unwrap(), 0);
    assert_eq!(checked_u32("shader blob", u32::MAX as usize).unwrap(), u32::MAX);

    #[cfg(target_pointer_width = "64")]
    {
        let err = checked_u32("blob region", u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(
            err,
            PackageError::TooLarge { section: "blob region", size } if size == 1 << 32
        ));
        assert!(err.to_string().contains("blob region"));
    }
}
