//! Visibility scopes used to decide which declarations a rule inspects.

use crate::config::ConfigError;
use crate::tree::{Modifiers, TypeDecl, TypeKind, Visibility};
use std::fmt;
use std::str::FromStr;

/// A visibility scope, ordered from most to least visible.
///
/// `a.is_in(b)` holds when everything visible at `a` is also covered by a
/// check configured for `b`; `private` therefore includes every named scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// Matches nothing.
    Nothing,
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// Package-private.
    Package,
    /// `private`
    Private,
    /// Members of anonymous classes.
    Anoninner,
}

impl Scope {
    /// Returns true if `self` lies within `other`.
    #[must_use]
    pub fn is_in(self, other: Scope) -> bool {
        self <= other
    }

    /// Scope declared by a modifier list.
    #[must_use]
    pub fn of_modifiers(modifiers: &Modifiers) -> Self {
        match modifiers.visibility {
            Some(Visibility::Public) => Self::Public,
            Some(Visibility::Protected) => Self::Protected,
            Some(Visibility::Private) => Self::Private,
            None => Self::Package,
        }
    }

    /// Effective scope of a member, given the kind of the enclosing type.
    ///
    /// Members of interfaces and annotation types are implicitly public.
    #[must_use]
    pub fn effective(modifiers: &Modifiers, enclosing: Option<TypeKind>) -> Self {
        if enclosing.is_some_and(TypeKind::is_interface_like) {
            Self::Public
        } else {
            Self::of_modifiers(modifiers)
        }
    }

    /// Least visible scope declared by a chain of enclosing types.
    ///
    /// Returns `None` for an empty chain (top-level declarations).
    #[must_use]
    pub fn surrounding(ancestors: &[&TypeDecl]) -> Option<Self> {
        ancestors
            .iter()
            .map(|decl| {
                if decl.kind == TypeKind::Anonymous {
                    Self::Anoninner
                } else {
                    Self::of_modifiers(&decl.modifiers)
                }
            })
            .max()
    }

    /// Lowercase configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Package => "package",
            Self::Private => "private",
            Self::Anoninner => "anoninner",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nothing" => Ok(Self::Nothing),
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "package" => Ok(Self::Package),
            "private" => Ok(Self::Private),
            "anoninner" => Ok(Self::Anoninner),
            other => Err(format!("unknown scope '{other}'")),
        }
    }
}

/// Inclusion and exclusion scopes configured for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeFilter {
    /// Declarations must lie within this scope.
    pub scope: Scope,
    /// Declarations within this scope (together with their surroundings) are skipped.
    pub exclude: Option<Scope>,
}

impl Default for ScopeFilter {
    fn default() -> Self {
        Self {
            scope: Scope::Private,
            exclude: None,
        }
    }
}

impl ScopeFilter {
    /// Reads `scope` and `exclude_scope` from a rule configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for unknown scope names.
    pub fn from_config(rule: &str, config: &crate::RuleConfig) -> Result<Self, ConfigError> {
        let mut filter = Self::default();
        if let Some(s) = config.get_opt_str("scope") {
            filter.scope = s.parse().map_err(|e| ConfigError::invalid(rule, "scope", e))?;
        }
        if let Some(s) = config.get_opt_str("exclude_scope") {
            filter.exclude = Some(
                s.parse()
                    .map_err(|e| ConfigError::invalid(rule, "exclude_scope", e))?,
            );
        }
        Ok(filter)
    }

    /// Decides whether a declaration with the given scopes is checked.
    ///
    /// `surrounding` is `None` for top-level declarations.
    #[must_use]
    pub fn should_check(&self, declared: Scope, surrounding: Option<Scope>) -> bool {
        let included =
            declared.is_in(self.scope) && surrounding.map_or(true, |s| s.is_in(self.scope));
        let excluded = self.exclude.is_some_and(|ex| {
            declared.is_in(ex) && surrounding.map_or(true, |s| s.is_in(ex))
        });
        included && !excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_decl(kind: TypeKind, visibility: Option<Visibility>) -> TypeDecl {
        TypeDecl {
            kind,
            name: "T".to_string(),
            line: 1,
            column: 0,
            end_line: 2,
            modifiers: Modifiers {
                visibility,
                ..Modifiers::default()
            },
            type_params: Vec::new(),
            superclass: None,
            members: Vec::new(),
        }
    }

    #[test]
    fn ordering_follows_visibility() {
        assert!(Scope::Public.is_in(Scope::Private));
        assert!(Scope::Package.is_in(Scope::Package));
        assert!(!Scope::Private.is_in(Scope::Protected));
        assert!(!Scope::Anoninner.is_in(Scope::Private));
        assert!(Scope::Nothing.is_in(Scope::Public));
    }

    #[test]
    fn interface_members_are_public() {
        let mods = Modifiers::default();
        assert_eq!(Scope::effective(&mods, Some(TypeKind::Interface)), Scope::Public);
        assert_eq!(Scope::effective(&mods, Some(TypeKind::Class)), Scope::Package);
        assert_eq!(Scope::effective(&mods, None), Scope::Package);
    }

    #[test]
    fn surrounding_takes_least_visible() {
        let outer = type_decl(TypeKind::Class, Some(Visibility::Public));
        let inner = type_decl(TypeKind::Class, Some(Visibility::Private));
        let anon = type_decl(TypeKind::Anonymous, None);
        assert_eq!(Scope::surrounding(&[]), None);
        assert_eq!(Scope::surrounding(&[&outer]), Some(Scope::Public));
        assert_eq!(Scope::surrounding(&[&outer, &inner]), Some(Scope::Private));
        assert_eq!(
            Scope::surrounding(&[&outer, &anon]),
            Some(Scope::Anoninner)
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("Protected".parse::<Scope>(), Ok(Scope::Protected));
        assert_eq!("anoninner".parse::<Scope>(), Ok(Scope::Anoninner));
        assert!("world".parse::<Scope>().is_err());
    }

    #[test]
    fn filter_honours_exclusion() {
        let filter = ScopeFilter {
            scope: Scope::Private,
            exclude: Some(Scope::Protected),
        };
        assert!(!filter.should_check(Scope::Public, Some(Scope::Public)));
        assert!(filter.should_check(Scope::Private, Some(Scope::Public)));
        assert!(filter.should_check(Scope::Public, Some(Scope::Private)));
        assert!(!filter.should_check(Scope::Protected, None));
    }

    #[test]
    fn filter_limits_scope() {
        let filter = ScopeFilter {
            scope: Scope::Protected,
            exclude: None,
        };
        assert!(filter.should_check(Scope::Public, Some(Scope::Public)));
        assert!(!filter.should_check(Scope::Package, Some(Scope::Public)));
        assert!(!filter.should_check(Scope::Public, Some(Scope::Private)));
        assert!(!ScopeFilter::default().should_check(Scope::Public, Some(Scope::Anoninner)));
    }
}
