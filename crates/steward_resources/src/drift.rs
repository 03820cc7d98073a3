//! Declarative per-kind field tables for drift detection and patch building.
//!
//! Each kind lists the desired-state fields it manages once. The same table answers
//! "is the remote entity up to date?" during Observe and "what goes into the
//! modify payload?" during Update.

/// One managed field of a kind.
///
/// `differs` is `None` for write-only fields (image uploads) that the remote
/// API never echoes back. Those never count as drift and are only written on
/// a full patch.
pub struct Field<S, O, P> {
    /// Wire name, used in logs
    pub name: &'static str,
    /// Whether the desired value differs from the observed one
    pub differs: Option<fn(&S, &O) -> bool>,
    /// Write the desired value into the modify payload
    pub apply: fn(&S, &mut P),
}

impl<S, O, P> Field<S, O, P> {
    /// A field compared against observed state.
    pub const fn compared(
        name: &'static str,
        differs: fn(&S, &O) -> bool,
        apply: fn(&S, &mut P),
    ) -> Self {
        Self {
            name,
            differs: Some(differs),
            apply,
        }
    }

    /// A field the remote API accepts but never reports back.
    pub const fn write_only(name: &'static str, apply: fn(&S, &mut P)) -> Self {
        Self {
            name,
            differs: None,
            apply,
        }
    }
}

/// Names of the compared fields whose desired value differs from `observed`.
pub fn drift<S, O, P>(fields: &[Field<S, O, P>], spec: &S, observed: &O) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.differs.is_some_and(|differs| differs(spec, observed)))
        .map(|field| field.name)
        .collect()
}

/// Build a modify payload.
///
/// With an observation, only drifted fields are written. Without one, every
/// field is written. Returns `None` when the payload would be empty, which
/// callers treat as "nothing to send".
pub fn patch<S, O, P>(fields: &[Field<S, O, P>], spec: &S, observed: Option<&O>) -> Option<P>
where
    P: Default + PartialEq,
{
    let mut payload = P::default();
    for field in fields {
        let write = match (observed, field.differs) {
            (None, _) => true,
            (Some(observed), Some(differs)) => differs(spec, observed),
            (Some(_), None) => false,
        };
        if write {
            (field.apply)(spec, &mut payload);
        }
    }
    (payload != P::default()).then_some(payload)
}

/// An unset desired value never drifts.
pub(crate) fn option_differs<T: PartialEq>(desired: Option<&T>, actual: Option<&T>) -> bool {
    desired.is_some_and(|desired| Some(desired) != actual)
}

/// Desired value against an always-present observed value.
pub(crate) fn value_differs<T: PartialEq>(desired: Option<&T>, actual: &T) -> bool {
    desired.is_some_and(|desired| desired != actual)
}

/// Order-insensitive comparison for ID lists.
pub(crate) fn set_differs(desired: Option<&Vec<String>>, actual: &[String]) -> bool {
    desired.is_some_and(|desired| {
        let mut desired: Vec<&str> = desired.iter().map(String::as_str).collect();
        let mut actual: Vec<&str> = actual.iter().map(String::as_str).collect();
        desired.sort_unstable();
        desired.dedup();
        actual.sort_unstable();
        actual.dedup();
        desired != actual
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Spec {
        name: Option<String>,
        limit: Option<u32>,
        image: Option<String>,
    }

    struct Seen {
        name: String,
        limit: Option<u32>,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Patch {
        name: Option<String>,
        limit: Option<u32>,
        image: Option<String>,
    }

    const FIELDS: &[Field<Spec, Seen, Patch>] = &[
        Field::compared(
            "name",
            |s: &Spec, o: &Seen| value_differs(s.name.as_ref(), &o.name),
            |s: &Spec, p: &mut Patch| p.name = s.name.clone(),
        ),
        Field::compared(
            "limit",
            |s: &Spec, o: &Seen| option_differs(s.limit.as_ref(), o.limit.as_ref()),
            |s: &Spec, p: &mut Patch| p.limit = s.limit,
        ),
        Field::write_only("image", |s: &Spec, p: &mut Patch| {
            p.image = s.image.clone()
        }),
    ];

    fn seen() -> Seen {
        Seen {
            name: "general".into(),
            limit: Some(5),
        }
    }

    #[test]
    fn unset_fields_never_drift() {
        let spec = Spec::default();
        assert!(drift(FIELDS, &spec, &seen()).is_empty());
        assert_eq!(patch(FIELDS, &spec, Some(&seen())), None);
    }

    #[test]
    fn only_drifted_fields_are_patched() {
        let spec = Spec {
            name: Some("general".into()),
            limit: Some(10),
            image: Some("data:image/png;base64,AAAA".into()),
        };
        assert_eq!(drift(FIELDS, &spec, &seen()), vec!["limit"]);
        assert_eq!(
            patch(FIELDS, &spec, Some(&seen())),
            Some(Patch {
                limit: Some(10),
                ..Default::default()
            })
        );
    }

    #[test]
    fn unobserved_patch_writes_everything_set() {
        let spec = Spec {
            name: Some("general".into()),
            limit: None,
            image: Some("data:image/png;base64,AAAA".into()),
        };
        let payload = patch(FIELDS, &spec, None).unwrap();
        assert_eq!(payload.name.as_deref(), Some("general"));
        assert_eq!(payload.limit, None);
        assert!(payload.image.is_some());
    }

    #[test]
    fn role_lists_compare_as_sets() {
        let actual = vec!["2".to_string(), "1".to_string()];
        assert!(!set_differs(Some(&vec!["1".into(), "2".into()]), &actual));
        assert!(set_differs(Some(&vec!["1".into()]), &actual));
        assert!(!set_differs(None, &actual));
    }
}
