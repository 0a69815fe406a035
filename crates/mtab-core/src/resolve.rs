// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Selection rules for a single method identity.
//!
//! Class methods are ordered by the single-inheritance chain, so the most
//! specific one is found by folding. Interface methods form a partial order;
//! the maximally specific set keeps every candidate no other candidate
//! refines.

use crate::facts::{MethodFacts, TypeFacts};
use crate::tables::Resolved;

/// Most specific non-abstract class method among parent vtable occurrences.
pub fn resolve_concrete<M: MethodFacts>(locations: &[(usize, M)]) -> Option<M> {
    let mut result: Option<&M> = None;
    for (_, m) in locations {
        if m.is_abstract() || m.declaring_type().is_interface() {
            continue;
        }
        result = match result {
            None => Some(m),
            Some(current) => {
                let current_ty = current.declaring_type();
                let ty = m.declaring_type();
                if current_ty.is_assignable_from(&ty) {
                    Some(m)
                } else {
                    debug_assert!(
                        ty.is_assignable_from(&current_ty),
                        "{} and {} are unrelated class owners of one method",
                        ty.name(),
                        current_ty.name()
                    );
                    Some(current)
                }
            }
        };
    }
    result.cloned()
}

/// Maximally specific resolution among interface occurrences.
///
/// One non-abstract member wins. Several non-abstract members produce a
/// selection failure wrapping the first. With no non-abstract member the
/// first abstract one is returned.
pub fn resolve_maximally_specific<'a, M>(
    candidates: impl IntoIterator<Item = &'a M>,
) -> Option<Resolved<M>>
where
    M: MethodFacts + 'a,
{
    let mut maximal: Vec<&M> = Vec::new();
    for m in candidates {
        let ty = m.declaring_type();
        if maximal
            .iter()
            .any(|kept| ty.is_assignable_from(&kept.declaring_type()))
        {
            continue;
        }
        maximal.retain(|kept| !kept.declaring_type().is_assignable_from(&ty));
        maximal.push(m);
    }

    let mut concrete = maximal.iter().filter(|m| !m.is_abstract());
    match (concrete.next(), concrete.next()) {
        (Some(m), None) => Some(Resolved::Ok((*m).clone())),
        (Some(m), Some(_)) => Some(Resolved::SelectionFailure((*m).clone())),
        (None, _) => maximal.first().map(|m| Resolved::Ok((*m).clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Modifiers;
    use crate::testing::{Method, Universe};

    const PUB_ABS: Modifiers = Modifiers::PUBLIC.union(Modifiers::ABSTRACT);

    #[test]
    fn concrete_prefers_subclass() {
        let u = Universe::new();
        let a = u.class("A", "p", None);
        let b = u.class("B", "p", Some(&a));
        let on_a = Method::new("foo", "()V", Modifiers::PUBLIC, &a);
        let on_b = Method::new("foo", "()V", Modifiers::PUBLIC, &b);

        let found = resolve_concrete(&[(0, on_a.clone()), (1, on_b.clone())]).unwrap();
        assert_eq!(found.declaring_type(), b);
        let found = resolve_concrete(&[(0, on_b), (1, on_a)]).unwrap();
        assert_eq!(found.declaring_type(), b);
    }

    #[test]
    fn concrete_skips_abstract_and_interface_owners() {
        let u = Universe::new();
        let a = u.class("A", "p", None);
        let i = u.interface("I", "p", &[]);
        let abstract_ = Method::new("foo", "()V", PUB_ABS, &a);
        let default = Method::new("foo", "()V", Modifiers::PUBLIC, &i);
        assert!(resolve_concrete(&[(0, abstract_), (1, default)]).is_none());
    }

    #[test]
    fn subinterface_default_wins() {
        let u = Universe::new();
        let i1 = u.interface("I1", "p", &[]);
        let i2 = u.interface("I2", "p", &[&i1]);
        let base = Method::new("bar", "()V", Modifiers::PUBLIC, &i1);
        let refined = Method::new("bar", "()V", Modifiers::PUBLIC, &i2);

        let r = resolve_maximally_specific([&base, &refined]).unwrap();
        assert_eq!(r, Resolved::Ok(refined.clone()));
        let r = resolve_maximally_specific([&refined, &base]).unwrap();
        assert_eq!(r, Resolved::Ok(refined));
    }

    #[test]
    fn unrelated_defaults_are_ambiguous() {
        let u = Universe::new();
        let i1 = u.interface("I1", "p", &[]);
        let i2 = u.interface("I2", "p", &[]);
        let a = Method::new("bar", "()V", Modifiers::PUBLIC, &i1);
        let b = Method::new("bar", "()V", Modifiers::PUBLIC, &i2);

        let r = resolve_maximally_specific([&a, &b]).unwrap();
        assert_eq!(r, Resolved::SelectionFailure(a));
    }

    #[test]
    fn one_default_beside_abstract_wins() {
        let u = Universe::new();
        let i1 = u.interface("I1", "p", &[]);
        let i2 = u.interface("I2", "p", &[]);
        let abstract_ = Method::new("bar", "()V", PUB_ABS, &i1);
        let default = Method::new("bar", "()V", Modifiers::PUBLIC, &i2);

        let r = resolve_maximally_specific([&abstract_, &default]).unwrap();
        assert_eq!(r, Resolved::Ok(default));
    }

    #[test]
    fn reabstraction_hides_default() {
        let u = Universe::new();
        let i1 = u.interface("I1", "p", &[]);
        let i2 = u.interface("I2", "p", &[&i1]);
        let default = Method::new("bar", "()V", Modifiers::PUBLIC, &i1);
        let reabstracted = Method::new("bar", "()V", PUB_ABS, &i2);

        let r = resolve_maximally_specific([&default, &reabstracted]).unwrap();
        assert_eq!(r, Resolved::Ok(reabstracted));
    }

    #[test]
    fn empty_candidates() {
        let none: [&Method; 0] = [];
        assert!(resolve_maximally_specific(none).is_none());
    }
}
