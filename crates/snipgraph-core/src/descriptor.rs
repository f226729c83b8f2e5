//! Canonical method keys and method descriptors.
//!
//! A key has the shape `<DeclaringType>.<name>(<ParamDescriptors>)<ReturnDescriptor>`,
//! e.g. `Foo.bar(I)I` or `java.lang.String.<init>([C)V`. Encode-time registration
//! and decode-time lookup both derive it through [`MethodKey::new`], and the same
//! text shows up in logs and dumps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors from parsing keys and descriptors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("method key `{0}` has no descriptor")]
    MissingDescriptor(String),
    #[error("method key `{0}` has no declaring type or name")]
    MissingName(String),
    #[error("malformed method descriptor `{descriptor}` at byte {position}")]
    MalformedDescriptor { descriptor: String, position: usize },
}

/// Canonical textual identity of a method.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MethodKey(String);

/// Borrowed view of the three parts of a [`MethodKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyParts<'a> {
    pub declaring: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

impl MethodKey {
    /// Format a key from its parts. The descriptor is taken verbatim.
    pub fn new(declaring: &str, name: &str, descriptor: &str) -> Self {
        Self(format!("{declaring}.{name}{descriptor}"))
    }

    /// Parse and validate a key in canonical form.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        let Some(open) = text.find('(') else {
            return Err(KeyError::MissingDescriptor(text.to_string()));
        };
        let head = &text[..open];
        let Some(dot) = head.rfind('.') else {
            return Err(KeyError::MissingName(text.to_string()));
        };
        if dot == 0 || dot + 1 == head.len() {
            return Err(KeyError::MissingName(text.to_string()));
        }
        MethodDescriptor::parse(&text[open..])?;
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into declaring type, name and descriptor.
    pub fn parts(&self) -> KeyParts<'_> {
        let open = self.0.find('(').unwrap_or(self.0.len());
        let head = &self.0[..open];
        let dot = head.rfind('.').unwrap_or(0);
        KeyParts {
            declaring: &head[..dot],
            name: head.get(dot + 1..).unwrap_or(""),
            descriptor: &self.0[open..],
        }
    }

    pub fn declaring_type(&self) -> &str {
        self.parts().declaring
    }

    pub fn name(&self) -> &str {
        self.parts().name
    }

    pub fn descriptor(&self) -> &str {
        self.parts().descriptor
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MethodKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MethodKey> for String {
    fn from(key: MethodKey) -> Self {
        key.0
    }
}

/// Parsed `(params)return` descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    params: Vec<String>,
    ret: String,
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self, KeyError> {
        let bytes = descriptor.as_bytes();
        let malformed = |position: usize| KeyError::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            position,
        };

        if bytes.first() != Some(&b'(') {
            return Err(malformed(0));
        }
        let mut pos = 1;
        let mut params = Vec::new();
        while pos < bytes.len() && bytes[pos] != b')' {
            let end = field_descriptor_end(bytes, pos, false).ok_or_else(|| malformed(pos))?;
            params.push(descriptor[pos..end].to_string());
            pos = end;
        }
        if pos >= bytes.len() {
            return Err(malformed(pos));
        }
        pos += 1;
        let end = field_descriptor_end(bytes, pos, true).ok_or_else(|| malformed(pos))?;
        if end != bytes.len() {
            return Err(malformed(end));
        }
        Ok(Self {
            params,
            ret: descriptor[pos..end].to_string(),
        })
    }

    /// Raw parameter descriptors, receiver excluded.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn return_descriptor(&self) -> &str {
        &self.ret
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Type name of parameter `idx` (e.g. `int`, `java.lang.Object`, `Foo[]`).
    pub fn param_type_name(&self, idx: usize) -> Option<String> {
        self.params.get(idx).map(|d| descriptor_to_type_name(d))
    }
}

/// Index one past the field descriptor starting at `pos`.
fn field_descriptor_end(bytes: &[u8], mut pos: usize, allow_void: bool) -> Option<usize> {
    while bytes.get(pos) == Some(&b'[') {
        pos += 1;
    }
    match bytes.get(pos)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(pos + 1),
        b'V' if allow_void => Some(pos + 1),
        b'L' => {
            let semi = bytes[pos..].iter().position(|&b| b == b';')?;
            if semi < 2 {
                return None;
            }
            Some(pos + semi + 1)
        }
        _ => None,
    }
}

/// Convert a field descriptor into the dotted type name used by handles.
pub fn descriptor_to_type_name(descriptor: &str) -> String {
    let dims = descriptor.bytes().take_while(|&b| b == b'[').count();
    let elem = &descriptor[dims..];
    let mut name = match elem {
        "B" => "byte".to_string(),
        "C" => "char".to_string(),
        "D" => "double".to_string(),
        "F" => "float".to_string(),
        "I" => "int".to_string(),
        "J" => "long".to_string(),
        "S" => "short".to_string(),
        "Z" => "boolean".to_string(),
        "V" => "void".to_string(),
        _ => elem
            .strip_prefix('L')
            .and_then(|s| s.strip_suffix(';'))
            .unwrap_or(elem)
            .replace('/', "."),
    };
    for _ in 0..dims {
        name.push_str("[]");
    }
    name
}
