//! Object location URLs
//!
//! Builds the URL an uploaded object is reachable at, following the
//! addressing style the client was configured with.

use url::Url;

/// URL of `bucket/key` on `endpoint`
///
/// Path-style yields `endpoint/bucket/key`, virtual-hosted style yields
/// `scheme://bucket.host/key`. Hosts that cannot take a bucket label (IP
/// addresses) fall back to path-style. An endpoint that is not a URL is
/// joined as plain text.
pub fn object_location(endpoint: &str, bucket: &str, key: &str, force_path_style: bool) -> String {
    let mut url = match Url::parse(endpoint) {
        Ok(url) if url.has_host() => url,
        _ => return format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
    };

    let mut path_style = force_path_style;
    if !path_style {
        let virtual_host = url.host_str().map(|host| format!("{bucket}.{host}"));
        path_style = match virtual_host {
            Some(host) => url.set_host(Some(&host)).is_err(),
            None => true,
        };
    }

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty();
        if path_style {
            segments.push(bucket);
        }
        segments.extend(key.split('/'));
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_style() {
        assert_eq!(
            object_location("http://localhost:9000", "data", "dir/a.txt", true),
            "http://localhost:9000/data/dir/a.txt"
        );
    }

    #[test]
    fn test_virtual_hosted_style() {
        assert_eq!(
            object_location("https://s3.example.com", "data", "dir/a.txt", false),
            "https://data.s3.example.com/dir/a.txt"
        );
    }

    #[test]
    fn test_ip_endpoint_falls_back_to_path_style() {
        assert_eq!(
            object_location("http://127.0.0.1:9000", "data", "a.txt", false),
            "http://127.0.0.1:9000/data/a.txt"
        );
    }

    #[test]
    fn test_key_segments_are_encoded() {
        assert_eq!(
            object_location("http://localhost:9000/", "data", "my dir/a b.txt", true),
            "http://localhost:9000/data/my%20dir/a%20b.txt"
        );
    }

    #[test]
    fn test_endpoint_with_base_path() {
        assert_eq!(
            object_location("http://gateway:8080/s3/", "data", "a.txt", true),
            "http://gateway:8080/s3/data/a.txt"
        );
    }

    #[test]
    fn test_unparseable_endpoint() {
        assert_eq!(object_location("none", "data", "a.txt", true), "none/data/a.txt");
    }
}
