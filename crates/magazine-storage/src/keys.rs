//! Shared key and URL helpers for storage backends.

/// Build a storage key from a folder prefix and a file name.
///
/// Produces `{prefix}/{file_name}`, or `{file_name}` when the prefix is empty.
pub fn storage_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Public URL of an object in a public AWS bucket.
pub fn public_bucket_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

/// MIME type for an object, derived from the key's extension.
pub fn content_type_for_key(key: &str) -> &'static str {
    let extension = key.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_with_prefix() {
        assert_eq!(storage_key("docs_upload", "abc.jpg"), "docs_upload/abc.jpg");
        assert_eq!(storage_key("docs_upload/", "abc.jpg"), "docs_upload/abc.jpg");
    }

    #[test]
    fn test_storage_key_without_prefix() {
        assert_eq!(storage_key("", "abc_thumb.png"), "abc_thumb.png");
    }

    #[test]
    fn test_public_bucket_url() {
        assert_eq!(
            public_bucket_url("magazine", "us-east-1", "docs_upload/a.png"),
            "https://magazine.s3.us-east-1.amazonaws.com/docs_upload/a.png"
        );
    }

    #[test]
    fn test_content_type_for_key() {
        assert_eq!(content_type_for_key("a/b.jpeg"), "image/jpeg");
        assert_eq!(content_type_for_key("b_thumb.webp"), "image/webp");
        assert_eq!(content_type_for_key("b.PNG"), "application/octet-stream");
        assert_eq!(content_type_for_key("noext"), "application/octet-stream");
    }
}
