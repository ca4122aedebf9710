//! fixed-shape introspection queries
//!
//! type references are expanded three `ofType` levels deep, which bounds the
//! wrapper chains the generator can see.

pub const LIST_TYPES: &str = r#"query ListTypes {
  __schema {
    queryType { name }
    mutationType { name }
    types {
      name
      kind
    }
  }
}"#;

pub const OBJECT_BY_NAME: &str = r#"query ObjectByName($name: String!) {
  __type(name: $name) {
    name
    kind
    description
    possibleTypes {
      name
      kind
    }
    fields {
      name
      description
      type {
        name
        kind
        ofType {
          name
          kind
          ofType {
            name
            kind
            ofType {
              name
              kind
            }
          }
        }
      }
    }
  }
}"#;

pub const INPUT_OBJECT_BY_NAME: &str = r#"query InputObjectByName($name: String!) {
  __type(name: $name) {
    name
    kind
    description
    inputFields {
      name
      description
      defaultValue
      type {
        name
        kind
        ofType {
          name
          kind
          ofType {
            name
            kind
            ofType {
              name
              kind
            }
          }
        }
      }
    }
  }
}"#;

pub const ENUM_BY_NAME: &str = r#"query EnumByName($name: String!) {
  __type(name: $name) {
    name
    kind
    description
    enumValues {
      name
      description
    }
  }
}"#;

/// `{root}` is replaced by `queryType` or `mutationType`
const ROOT_FIELDS_TEMPLATE: &str = r#"query RootFields {
  __schema {
    {root} {
      name
      description
      fields {
        name
        description
        type {
          name
          kind
          ofType {
            name
            kind
            ofType {
              name
              kind
              ofType {
                name
                kind
              }
            }
          }
        }
        args {
          name
          description
          defaultValue
          type {
            name
            kind
            ofType {
              name
              kind
              ofType {
                name
                kind
                ofType {
                  name
                  kind
                }
              }
            }
          }
        }
      }
    }
  }
}"#;

pub fn root_fields(schema_field: &str) -> String {
    ROOT_FIELDS_TEMPLATE.replace("{root}", schema_field)
}
