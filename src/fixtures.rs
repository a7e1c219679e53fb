#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::scalar::Scalar;
    use crate::tree::Node;

    /// Two-field projection of a `key` subtree.
    #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
    pub struct KeyConfig {
        pub alg: String,
        pub size: i64,
    }

    /// A certificate request spread over nested sections.
    #[derive(Deserialize, Debug, PartialEq)]
    pub struct CertConfig {
        pub cn: String,
        pub key: KeyConfig,
        #[serde(rename = "DNSs", default)]
        pub dns_names: Vec<String>,
        pub expiry: Option<String>,
    }

    /// `{alg: rsa, size: 2048}`
    pub fn key_tree() -> Node {
        let mut node = Node::default();
        node.insert_path("alg", Node::Leaf(Scalar::Str("rsa".into())));
        node.insert_path("size", Node::Leaf(Scalar::Int(2048)));
        node
    }

    pub const CERT_YAML: &str = r#"
cn: test-ca
names:
key:
  alg: rsa
  size: 2048
DNSs:
  - localhost
  - test-ca
IPs:
  - 127.0.0.1
  - 192.168.1.1
expiry: 72h
"#;

    pub const CERT_TOML: &str = r#"
cn = "test-ca"
DNSs = ["localhost", "test-ca"]
expiry = "72h"

[key]
alg = "rsa"
size = 2048
"#;

    pub const CERT_JSON: &str = r#"{
  "cn": "test-ca",
  "key": { "alg": "rsa", "size": 2048 },
  "DNSs": ["localhost", "test-ca"],
  "expiry": "72h"
}"#;

    pub fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }
}
