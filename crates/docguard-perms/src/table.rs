//! Immutable permission table built from contribution descriptors.
//!
//! A [`PermissionTable`] is never mutated after [`PermissionTable::build`]
//! returns. The registry replaces it wholesale on every contribution change.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use docguard_core::EVERYTHING;

use crate::descriptor::{
    DocumentTypeDescriptor, PermissionDescriptor, UserVisiblePermission, VisibilityDescriptor,
    VisibilityItem,
};
use crate::provider::PermissionProvider;

/// Folded definition of a single permission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PermissionDef {
    include: Vec<String>,
    alias: Vec<String>,
}

/// Merged visibility entry, before filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MergedItem {
    permission: String,
    show: bool,
    order: i32,
    deny_permission: Option<String>,
}

/// A complete, consistent snapshot of the permission registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionTable {
    /// Name -> direct includes, for every known permission.
    includes: BTreeMap<String, Vec<String>>,

    /// Name -> aliases.
    aliases: BTreeMap<String, Vec<String>>,

    /// Name -> every compound permission transitively including it, sorted.
    groups: BTreeMap<String, Vec<String>>,

    /// Default user visible permissions, sorted.
    default_visibility: Vec<UserVisiblePermission>,

    /// Type -> user visible permissions for types with an override.
    type_visibility: HashMap<String, Vec<UserVisiblePermission>>,

    /// Type -> supertype.
    type_parents: HashMap<String, String>,
}

impl PermissionTable {
    /// Replay descriptors in registration order into a new table.
    ///
    /// Invalid descriptors are logged and skipped; the result is always a
    /// usable table.
    pub fn build(
        permissions: &[PermissionDescriptor],
        visibility: &[VisibilityDescriptor],
        types: &[DocumentTypeDescriptor],
    ) -> Self {
        let defs = fold_permissions(permissions);
        let includes = link_includes(&defs);
        let groups = compute_groups(&includes);
        let aliases = defs
            .iter()
            .filter(|(_, def)| !def.alias.is_empty())
            .map(|(name, def)| (name.clone(), def.alias.clone()))
            .collect();

        let (default_visibility, type_visibility) = fold_visibility(visibility, &includes);

        let mut type_parents = HashMap::new();
        for t in types {
            match &t.parent {
                Some(parent) if !parent.is_empty() && parent != &t.name => {
                    type_parents.insert(t.name.clone(), parent.clone());
                }
                Some(parent) if parent == &t.name => {
                    tracing::warn!(
                        doc_type = %t.name,
                        "document type declared as its own parent, ignored"
                    );
                    type_parents.remove(&t.name);
                }
                _ => {
                    type_parents.remove(&t.name);
                }
            }
        }

        tracing::debug!(
            permissions = includes.len(),
            typed_visibility = type_visibility.len(),
            document_types = type_parents.len(),
            "permission table rebuilt"
        );

        Self {
            includes,
            aliases,
            groups,
            default_visibility,
            type_visibility,
            type_parents,
        }
    }

    /// Whether `name` is a known permission.
    pub fn contains(&self, name: &str) -> bool {
        self.includes.contains_key(name)
    }

    /// Number of known permissions.
    pub fn len(&self) -> usize {
        self.includes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Nearest type in the supertype chain of `doc_type` (itself included)
    /// that has a visibility override.
    fn visibility_type_for(&self, doc_type: &str) -> Option<&Vec<UserVisiblePermission>> {
        let mut seen = HashSet::new();
        let mut current = Some(doc_type);
        while let Some(t) = current {
            if !seen.insert(t) {
                tracing::warn!(doc_type, "cycle in document type hierarchy");
                return None;
            }
            if let Some(list) = self.type_visibility.get(t) {
                return Some(list);
            }
            current = self.type_parents.get(t).map(String::as_str);
        }
        None
    }
}

impl PermissionProvider for PermissionTable {
    fn permission_groups(&self, name: &str) -> Vec<String> {
        self.groups.get(name).cloned().unwrap_or_default()
    }

    fn sub_permissions(&self, name: &str) -> Vec<String> {
        self.includes.get(name).cloned().unwrap_or_default()
    }

    fn alias_permissions(&self, name: &str) -> Vec<String> {
        self.aliases.get(name).cloned().unwrap_or_default()
    }

    fn permissions(&self) -> Vec<String> {
        self.includes.keys().cloned().collect()
    }

    fn user_visible_permissions(&self, doc_type: Option<&str>) -> Vec<UserVisiblePermission> {
        doc_type
            .filter(|t| !t.is_empty())
            .and_then(|t| self.visibility_type_for(t))
            .unwrap_or(&self.default_visibility)
            .clone()
    }
}

/// Fold permission descriptors by name. `Everything` always exists.
fn fold_permissions(descriptors: &[PermissionDescriptor]) -> BTreeMap<String, PermissionDef> {
    let mut defs: BTreeMap<String, PermissionDef> = BTreeMap::new();
    defs.insert(EVERYTHING.to_string(), PermissionDef::default());

    for d in descriptors {
        if d.name.is_empty() {
            tracing::warn!("skipping permission descriptor with empty name");
            continue;
        }
        if d.include.iter().any(|p| p == &d.name) {
            tracing::warn!(permission = %d.name, "skipping permission descriptor including itself");
            continue;
        }

        let def = defs.entry(d.name.clone()).or_default();
        if !d.include.is_empty() {
            def.include.clear();
            for p in &d.include {
                if !def.include.contains(p) {
                    def.include.push(p.clone());
                }
            }
        }
        def.include.retain(|p| !d.remove.contains(p));
        if !d.alias.is_empty() {
            def.alias = d.alias.clone();
        }
    }

    defs
}

/// Resolve includes into a graph over known names.
///
/// Includes naming unknown permissions are dropped. Edges are added in name
/// order; an edge that would close a cycle is dropped.
fn link_includes(defs: &BTreeMap<String, PermissionDef>) -> BTreeMap<String, Vec<String>> {
    let mut includes: BTreeMap<String, Vec<String>> =
        defs.keys().map(|name| (name.clone(), Vec::new())).collect();

    for (name, def) in defs {
        for sub in &def.include {
            if !defs.contains_key(sub) {
                tracing::warn!(
                    permission = %name,
                    include = %sub,
                    "dropping include of unknown permission"
                );
                continue;
            }
            if reaches(&includes, sub, name) {
                tracing::warn!(
                    permission = %name,
                    include = %sub,
                    "dropping include that would create a cycle"
                );
                continue;
            }
            if let Some(list) = includes.get_mut(name) {
                list.push(sub.clone());
            }
        }
    }

    includes
}

/// Whether `to` is reachable from `from` following includes (or equal).
fn reaches(includes: &BTreeMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    let mut stack = vec![from];
    let mut seen = HashSet::new();
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(subs) = includes.get(current) {
            stack.extend(subs.iter().map(String::as_str));
        }
    }
    false
}

/// Invert the include graph and close it transitively.
fn compute_groups(includes: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for (compound, subs) in includes {
        for sub in subs {
            parents.entry(sub.as_str()).or_default().push(compound.as_str());
        }
    }

    let mut groups = BTreeMap::new();
    for name in includes.keys() {
        let mut found: BTreeSet<&str> = BTreeSet::new();
        let mut stack: Vec<&str> = parents.get(name.as_str()).cloned().unwrap_or_default();
        while let Some(p) = stack.pop() {
            if found.insert(p) {
                if let Some(more) = parents.get(p) {
                    stack.extend(more.iter().copied());
                }
            }
        }
        if !found.is_empty() {
            groups.insert(name.clone(), found.into_iter().map(str::to_string).collect());
        }
    }
    groups
}

type VisibilityLists = (Vec<UserVisiblePermission>, HashMap<String, Vec<UserVisiblePermission>>);

/// Fold visibility descriptors.
///
/// A type override starts from the default list as folded at the point the
/// type first appears, and no longer follows later default contributions.
fn fold_visibility(
    descriptors: &[VisibilityDescriptor],
    includes: &BTreeMap<String, Vec<String>>,
) -> VisibilityLists {
    let mut default_items: Vec<MergedItem> = Vec::new();
    let mut typed: BTreeMap<String, Vec<MergedItem>> = BTreeMap::new();

    for d in descriptors {
        let target = if d.is_default() {
            &mut default_items
        } else {
            typed
                .entry(d.doc_type.clone())
                .or_insert_with(|| default_items.clone())
        };
        for item in &d.items {
            if !includes.contains_key(&item.permission) {
                tracing::warn!(
                    doc_type = %d.doc_type,
                    permission = %item.permission,
                    "skipping visible permission referencing unknown permission"
                );
                continue;
            }
            merge_item(target, item);
        }
    }

    let typed = typed
        .into_iter()
        .map(|(t, items)| (t, sorted_visible(&items)))
        .collect();
    (sorted_visible(&default_items), typed)
}

fn merge_item(items: &mut Vec<MergedItem>, item: &VisibilityItem) {
    match items.iter_mut().find(|m| m.permission == item.permission) {
        Some(existing) => {
            existing.show = item.show;
            if let Some(order) = item.order {
                existing.order = order;
            }
            if item.deny_permission.is_some() {
                existing.deny_permission = item.deny_permission.clone();
            }
        }
        None => items.push(MergedItem {
            permission: item.permission.clone(),
            show: item.show,
            order: item.order.unwrap_or(0),
            deny_permission: item.deny_permission.clone(),
        }),
    }
}

fn sorted_visible(items: &[MergedItem]) -> Vec<UserVisiblePermission> {
    let mut shown: Vec<&MergedItem> = items.iter().filter(|m| m.show).collect();
    shown.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.permission.cmp(&b.permission)));
    shown
        .into_iter()
        .map(|m| UserVisiblePermission::new(m.permission.clone(), m.deny_permission.clone()))
        .collect()
}
