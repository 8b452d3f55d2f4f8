#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    pub const YAML_EXAMPLE: &str = "\
Hacker: true
name: steve
hobbies:
- skateboarding
- snowboarding
- go
clothing:
  jacket: leather
  trousers: denim
  pants:
    size: large
age: 35
eyes : brown
beard: true
";

    pub const TOML_EXAMPLE: &str = r#"title = "TOML Example"
[owner]
organization = "MongoDB"
Bio = "MongoDB Chief Developer Advocate & Hacker at Large"
dob = 1979-05-27T07:32:00Z # First class dates? Why not?
"#;

    pub const JSON_EXAMPLE: &str = r#"{
    "id": "0001",
    "type": "donut",
    "name": "Cake",
    "ppu": 0.55,
    "batters": {
        "batter": [
            {"type": "Regular"},
            {"type": "Chocolate"},
            {"type": "Blueberry"},
            {"type": "Devil's Food"}
        ]
    }
}"#;

    pub const INI_EXAMPLE: &str = "\
; global settings
debug = true

[Server]
host = example.com
port = 8080

[server.tls]
enabled = false
";

    pub const PROPERTIES_EXAMPLE: &str = "\
# database
database.host = localhost
database.port: 5432
! old style comment
app.name=Demo App
empty.value =
";

    /// Synthetic environment for env-layer tests.
    pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
