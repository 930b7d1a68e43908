// Parse records and the derivation (method) stack attached to them.

use serde::Serialize;

use crate::tagset::Tag;

/// Identifier of an analyzer unit inside its driver, assigned at
/// registration. Method records carry it so that lexeme enumeration and
/// normalization can be dispatched back to the unit that produced the step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a single derivation step did. Each variant carries enough data for
/// the owning unit to reverse its contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Base dictionary lookup: the matched surface form and its
    /// (paradigm, form) reference.
    DictionaryHit {
        word: String,
        paradigm_id: u16,
        form_index: u16,
    },
    /// A lexical prefix was stripped and re-attached.
    PrefixAttached { prefix: String },
    /// The reading was predicted from this word-final suffix.
    SuffixPredicted { suffix: String },
    /// A hyphen-separated particle was stripped and re-attached.
    ParticleAttached { particle: String },
    /// The unit contributed no reversible transformation (shape, unknown,
    /// initials, hyphen composition).
    Simple,
}

/// One entry of a parse's method stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub unit: UnitId,
    pub kind: MethodKind,
}

impl Method {
    pub fn new(unit: UnitId, kind: MethodKind) -> Method {
        Method { unit, kind }
    }

    /// The (paradigm, form) reference if this is a dictionary hit.
    pub fn paradigm_ref(&self) -> Option<(u16, u16)> {
        match &self.kind {
            MethodKind::DictionaryHit {
                paradigm_id,
                form_index,
                ..
            } => Some((*paradigm_id, *form_index)),
            _ => None,
        }
    }
}

/// A single morphological interpretation of a word: the surface form, its
/// tag, the normal form (lemma), a confidence score and the stack of
/// derivation steps that produced it.
///
/// Parses are immutable by convention; the `with_*`/`without_*` helpers
/// return transformed copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parse {
    pub word: String,
    pub tag: Tag,
    pub normal_form: String,
    pub score: f64,
    pub methods_stack: Vec<Method>,
}

impl Parse {
    pub fn new(
        word: impl Into<String>,
        tag: Tag,
        normal_form: impl Into<String>,
        score: f64,
        methods_stack: Vec<Method>,
    ) -> Parse {
        Parse {
            word: word.into(),
            tag,
            normal_form: normal_form.into(),
            score,
            methods_stack,
        }
    }

    /// The paradigm id of the base dictionary lookup, if any.
    pub fn paradigm_id(&self) -> Option<u16> {
        self.methods_stack
            .first()
            .and_then(Method::paradigm_ref)
            .map(|(pid, _)| pid)
    }

    /// Copy with `suffix` appended to both the word and the normal form.
    pub fn with_suffix(&self, suffix: &str) -> Parse {
        Parse {
            word: format!("{}{suffix}", self.word),
            normal_form: format!("{}{suffix}", self.normal_form),
            ..self.clone()
        }
    }

    /// Copy with `suffix_len` bytes removed from the end of both the word
    /// and the normal form. The caller guarantees the suffix is really there.
    pub fn without_fixed_suffix(&self, suffix_len: usize) -> Parse {
        let cut = |s: &str| s[..s.len().saturating_sub(suffix_len)].to_string();
        Parse {
            word: cut(&self.word),
            normal_form: cut(&self.normal_form),
            ..self.clone()
        }
    }

    /// Copy with `prefix` prepended to both the word and the normal form.
    pub fn with_prefix(&self, prefix: &str) -> Parse {
        Parse {
            word: format!("{prefix}{}", self.word),
            normal_form: format!("{prefix}{}", self.normal_form),
            ..self.clone()
        }
    }

    /// Copy with `method` pushed onto the stack.
    pub fn with_method(&self, method: Method) -> Parse {
        let mut stack = self.methods_stack.clone();
        stack.push(method);
        Parse {
            methods_stack: stack,
            ..self.clone()
        }
    }

    /// Copy with the top of the stack removed.
    pub fn without_last_method(&self) -> Parse {
        let mut stack = self.methods_stack.clone();
        stack.pop();
        Parse {
            methods_stack: stack,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagset::Tag;

    fn parse() -> Parse {
        let tag = Tag::new("NOUN sing,nomn").unwrap();
        Parse::new("мама", tag, "мама", 1.0, Vec::new())
    }

    #[test]
    fn test_suffix_round_trip() {
        let p = parse().with_suffix("-то");
        assert_eq!(p.word, "мама-то");
        assert_eq!(p.normal_form, "мама-то");
        let back = p.without_fixed_suffix("-то".len());
        assert_eq!(back.word, "мама");
        assert_eq!(back.normal_form, "мама");
    }

    #[test]
    fn test_method_stack_edit() {
        let m = Method::new(
            UnitId(0),
            MethodKind::DictionaryHit {
                word: "мама".to_string(),
                paradigm_id: 3,
                form_index: 1,
            },
        );
        let p = parse().with_method(m);
        assert_eq!(p.paradigm_id(), Some(3));
        assert!(p.without_last_method().methods_stack.is_empty());
    }
}
