// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! In-memory NAT rulebases: ordered pre and post rule lists.

use tracing::{debug, warn};

use crate::network::filter::{ContainerScope, NatRuleFilter};
use crate::network::nat_rules::{
    Container, NatMoveDestination, NatRuleCreateModel, NatRuleId, NatRuleMoveModel,
    NatRuleResponseModel, NatRuleUpdateModel, NatRulebase,
};
use crate::utils::Validate;
use crate::{ModelError, ModelResult};

/// Rules are evaluated in list order, pre rulebase first.
#[derive(Clone, Debug, Default)]
pub struct NatRuleTable {
    pre: Vec<NatRuleResponseModel>,
    post: Vec<NatRuleResponseModel>,
}

impl NatRuleTable {
    /// Create new NAT rule table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Number of rules in both rulebases
    #[must_use]
    pub fn len(&self) -> usize {
        self.pre.len() + self.post.len()
    }
    /// Tells if [`NatRuleTable`] is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    fn rules(&self, rulebase: NatRulebase) -> &Vec<NatRuleResponseModel> {
        match rulebase {
            NatRulebase::Pre => &self.pre,
            NatRulebase::Post => &self.post,
        }
    }

    fn rules_mut(&mut self, rulebase: NatRulebase) -> &mut Vec<NatRuleResponseModel> {
        match rulebase {
            NatRulebase::Pre => &mut self.pre,
            NatRulebase::Post => &mut self.post,
        }
    }

    fn all(&self) -> impl Iterator<Item = &NatRuleResponseModel> {
        self.pre.iter().chain(self.post.iter())
    }

    /// Locate a rule by id
    fn position(&self, id: NatRuleId) -> Option<(NatRulebase, usize)> {
        [NatRulebase::Pre, NatRulebase::Post]
            .into_iter()
            .find_map(|rb| {
                self.rules(rb)
                    .iter()
                    .position(|r| r.id == id)
                    .map(|pos| (rb, pos))
            })
    }

    fn check_name_free(
        &self,
        name: &str,
        container: &Container,
        except: Option<NatRuleId>,
    ) -> ModelResult {
        let taken = self
            .all()
            .filter(|r| Some(r.id) != except)
            .any(|r| r.base.name == name && &r.base.container == container);
        if taken {
            return Err(ModelError::DuplicateRuleName(name.to_owned()));
        }
        Ok(())
    }

    /// Iterate over the rules of a rulebase, in evaluation order
    pub fn iter(&self, rulebase: NatRulebase) -> impl Iterator<Item = &NatRuleResponseModel> {
        self.rules(rulebase).iter()
    }

    /// Get a rule by id
    #[must_use]
    pub fn get(&self, id: NatRuleId) -> Option<&NatRuleResponseModel> {
        self.all().find(|r| r.id == id)
    }

    /// Get a rule by name within a container
    #[must_use]
    pub fn get_by_name(&self, name: &str, container: &Container) -> Option<&NatRuleResponseModel> {
        self.all()
            .find(|r| r.base.name == name && &r.base.container == container)
    }

    /// Tell which rulebase a rule is in
    #[must_use]
    pub fn rulebase_of(&self, id: NatRuleId) -> Option<NatRulebase> {
        self.position(id).map(|(rb, _)| rb)
    }

    /// Validate a [`NatRuleCreateModel`], assign it an id and append it at the bottom of the
    /// given rulebase.
    pub fn create(
        &mut self,
        rulebase: NatRulebase,
        rule: NatRuleCreateModel,
    ) -> Result<NatRuleId, ModelError> {
        rule.validate()?;
        self.check_name_free(&rule.base.name, &rule.base.container, None)?;
        let id = NatRuleId::new();
        debug!("Creating NAT rule '{}' ({id}) in {rulebase} rulebase", rule.base.name);
        self.rules_mut(rulebase)
            .push(NatRuleResponseModel::from_create(id, rule));
        Ok(id)
    }

    /// Add a rule with a known id at the bottom of the given rulebase
    pub fn insert(&mut self, rulebase: NatRulebase, rule: NatRuleResponseModel) -> ModelResult {
        rule.validate()?;
        if self.position(rule.id).is_some() {
            return Err(ModelError::DuplicateRuleId(rule.id));
        }
        self.check_name_free(&rule.base.name, &rule.base.container, None)?;
        debug!("Adding NAT rule '{}' ({}) to {rulebase} rulebase", rule.base.name, rule.id);
        self.rules_mut(rulebase).push(rule);
        Ok(())
    }

    /// Replace the contents of an existing rule, keeping its position. An update that names no
    /// container keeps the container of the stored rule.
    pub fn update(
        &mut self,
        mut update: NatRuleUpdateModel,
    ) -> Result<&NatRuleResponseModel, ModelError> {
        let Some(id) = update.id else {
            return Err(ModelError::MissingParameter("id"));
        };
        update.validate()?;
        let (rulebase, pos) = self.position(id).ok_or(ModelError::NoSuchRule(id))?;
        match update.base.container.count() {
            0 => update
                .base
                .container
                .clone_from(&self.rules(rulebase)[pos].base.container),
            1 => {}
            _ => return Err(ModelError::InvalidContainer),
        }
        self.check_name_free(&update.base.name, &update.base.container, Some(id))?;
        debug!("Updating NAT rule '{}' ({id})", update.base.name);
        let rules = self.rules_mut(rulebase);
        rules[pos].base = update.base;
        Ok(&rules[pos])
    }

    /// Remove a rule
    pub fn delete(&mut self, id: NatRuleId) -> Result<NatRuleResponseModel, ModelError> {
        let (rulebase, pos) = self.position(id).ok_or(ModelError::NoSuchRule(id))?;
        let rule = self.rules_mut(rulebase).remove(pos);
        debug!("Deleted NAT rule '{}' ({id})", rule.base.name);
        Ok(rule)
    }

    /// Move a rule to the top or bottom of a rulebase, or before/after another rule of that
    /// rulebase. The table is left untouched if the move is rejected.
    pub fn move_rule(&mut self, id: NatRuleId, mv: &NatRuleMoveModel) -> ModelResult {
        mv.validate()?;
        let (from, pos) = self.position(id).ok_or(ModelError::NoSuchRule(id))?;

        // the anchor must be in the target rulebase and be another rule
        if let Some(anchor) = mv.destination_rule {
            if anchor == id {
                return Err(ModelError::MoveRelativeToSelf(id));
            }
            if !self.rules(mv.rulebase).iter().any(|r| r.id == anchor) {
                warn!("Move of NAT rule {id}: no rule {anchor} in {} rulebase", mv.rulebase);
                return Err(ModelError::NoSuchRule(anchor));
            }
        }

        let rule = self.rules_mut(from).remove(pos);
        let target = self.rules_mut(mv.rulebase);
        let anchor_pos = mv
            .destination_rule
            .and_then(|anchor| target.iter().position(|r| r.id == anchor));
        let at = match (mv.destination, anchor_pos) {
            (NatMoveDestination::Top, _) => 0,
            (NatMoveDestination::Bottom, _) => target.len(),
            (NatMoveDestination::Before, Some(anchor)) => anchor,
            (NatMoveDestination::After, Some(anchor)) => anchor + 1,
            (NatMoveDestination::Before | NatMoveDestination::After, None) => {
                let anchor = mv.destination_rule.unwrap_or(id);
                self.rules_mut(from).insert(pos, rule);
                return Err(ModelError::NoSuchRule(anchor));
            }
        };
        debug!(
            "Moving NAT rule '{}' ({id}) to {} of {} rulebase (position {at})",
            rule.base.name, mv.destination, mv.rulebase
        );
        target.insert(at, rule);
        Ok(())
    }

    /// The rules of a rulebase that pass a filter and, if given, a container scope
    #[must_use]
    pub fn list(
        &self,
        rulebase: NatRulebase,
        filter: &NatRuleFilter,
        scope: Option<&ContainerScope>,
    ) -> Vec<&NatRuleResponseModel> {
        let kept = filter.apply(self.iter(rulebase));
        match scope {
            Some(scope) => scope.apply(kept),
            None => kept,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::network::nat_rules::{NatRuleBase, NatRuleBaseBuilder, NatType};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn base(name: &str) -> NatRuleBase {
        NatRuleBaseBuilder::default()
            .name(name)
            .container(Container::folder("Texas"))
            .build()
            .unwrap()
    }

    fn create(table: &mut NatRuleTable, rulebase: NatRulebase, name: &str) -> NatRuleId {
        table
            .create(rulebase, NatRuleCreateModel::new(base(name)))
            .unwrap()
    }

    fn order(table: &NatRuleTable, rulebase: NatRulebase) -> Vec<String> {
        table.iter(rulebase).map(|r| r.base.name.clone()).collect()
    }

    #[test]
    fn create_appends_and_rejects_duplicates() {
        let mut table = NatRuleTable::new();
        assert!(table.is_empty());
        let a = create(&mut table, NatRulebase::Pre, "a");
        let _b = create(&mut table, NatRulebase::Pre, "b");
        create(&mut table, NatRulebase::Post, "c");
        assert_eq!(table.len(), 3);
        assert_eq!(order(&table, NatRulebase::Pre), ["a", "b"]);
        assert_eq!(table.rulebase_of(a), Some(NatRulebase::Pre));

        assert_eq!(
            table.create(NatRulebase::Post, NatRuleCreateModel::new(base("a"))),
            Err(ModelError::DuplicateRuleName("a".to_owned()))
        );

        // same name, other container
        let mut other = base("a");
        other.container = Container::snippet("shared");
        assert!(table.create(NatRulebase::Pre, NatRuleCreateModel::new(other)).is_ok());

        // invalid rules never land in the table
        let mut bad = base("bad");
        bad.container = Container::default();
        assert_eq!(
            table.create(NatRulebase::Pre, NatRuleCreateModel::new(bad)),
            Err(ModelError::InvalidContainer)
        );
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut table = NatRuleTable::new();
        let rule = NatRuleResponseModel {
            id: NatRuleId::new(),
            base: base("a"),
        };
        table.insert(NatRulebase::Pre, rule.clone()).unwrap();
        let mut renamed = rule.clone();
        renamed.base.name = "b".to_owned();
        assert_eq!(
            table.insert(NatRulebase::Post, renamed),
            Err(ModelError::DuplicateRuleId(rule.id))
        );
        assert_eq!(table.get(rule.id), Some(&rule));
        assert_eq!(
            table.get_by_name("a", &Container::folder("Texas")),
            Some(&rule)
        );
        assert_eq!(table.get_by_name("a", &Container::folder("Other")), None);
    }

    #[test]
    fn update_keeps_position() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Pre, "a");
        create(&mut table, NatRulebase::Pre, "b");

        let mut update = NatRuleUpdateModel::from(table.get(a).unwrap().clone());
        update.base.name = "a2".to_owned();
        update.base.nat_type = NatType::Nptv6;
        let updated = table.update(update).unwrap();
        assert_eq!(updated.base.nat_type, NatType::Nptv6);
        assert_eq!(order(&table, NatRulebase::Pre), ["a2", "b"]);

        // renaming onto a taken name
        let mut update = NatRuleUpdateModel::from(table.get(a).unwrap().clone());
        update.base.name = "b".to_owned();
        assert_eq!(
            table.update(update),
            Err(ModelError::DuplicateRuleName("b".to_owned()))
        );

        let missing = NatRuleUpdateModel {
            id: None,
            base: base("x"),
        };
        assert_eq!(
            table.update(missing),
            Err(ModelError::MissingParameter("id"))
        );

        let ghost = NatRuleId::new();
        assert_eq!(
            table.update(NatRuleUpdateModel::new(ghost, base("x"))),
            Err(ModelError::NoSuchRule(ghost))
        );
    }

    #[test]
    fn update_without_container_keeps_it() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Pre, "a");
        let texas = Container::folder("Texas");

        let update: NatRuleUpdateModel = serde_json::from_str(&format!(
            r#"{{"id": "{a}", "name": "a", "description": "changed"}}"#
        ))
        .unwrap();
        let updated = table.update(update).unwrap();
        assert_eq!(updated.base.container, texas);
        assert_eq!(updated.base.description.as_deref(), Some("changed"));

        let found = table.get_by_name("a", &texas).unwrap();
        assert_eq!(found.id, a);
        assert_eq!(
            table.create(NatRulebase::Pre, NatRuleCreateModel::new(base("a"))),
            Err(ModelError::DuplicateRuleName("a".to_owned()))
        );

        // an explicit container still replaces the stored one
        let mut moved = base("a");
        moved.container = Container::snippet("shared");
        let updated = table.update(NatRuleUpdateModel::new(a, moved)).unwrap();
        assert_eq!(updated.base.container, Container::snippet("shared"));

        let mut both = base("a");
        both.container.device = Some("fw-1".to_owned());
        assert_eq!(
            table.update(NatRuleUpdateModel::new(a, both)),
            Err(ModelError::InvalidContainer)
        );
    }

    #[test]
    fn update_without_container_checks_name_in_stored_container() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Pre, "a");
        create(&mut table, NatRulebase::Pre, "b");

        let mut rename = base("b");
        rename.container = Container::default();
        assert_eq!(
            table.update(NatRuleUpdateModel::new(a, rename)),
            Err(ModelError::DuplicateRuleName("b".to_owned()))
        );
        assert_eq!(order(&table, NatRulebase::Pre), ["a", "b"]);
    }

    #[test]
    fn delete_removes() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Post, "a");
        assert_eq!(table.delete(a).unwrap().base.name, "a");
        assert!(table.is_empty());
        assert_eq!(table.delete(a), Err(ModelError::NoSuchRule(a)));
    }

    #[test]
    #[traced_test]
    fn moves() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Pre, "a");
        let b = create(&mut table, NatRulebase::Pre, "b");
        let c = create(&mut table, NatRulebase::Pre, "c");
        let d = create(&mut table, NatRulebase::Post, "d");

        table
            .move_rule(c, &NatRuleMoveModel::top(NatRulebase::Pre))
            .unwrap();
        assert_eq!(order(&table, NatRulebase::Pre), ["c", "a", "b"]);

        table
            .move_rule(c, &NatRuleMoveModel::bottom(NatRulebase::Pre))
            .unwrap();
        assert_eq!(order(&table, NatRulebase::Pre), ["a", "b", "c"]);

        table
            .move_rule(c, &NatRuleMoveModel::before(NatRulebase::Pre, b))
            .unwrap();
        assert_eq!(order(&table, NatRulebase::Pre), ["a", "c", "b"]);

        table
            .move_rule(a, &NatRuleMoveModel::after(NatRulebase::Pre, b))
            .unwrap();
        assert_eq!(order(&table, NatRulebase::Pre), ["c", "b", "a"]);

        // across rulebases
        table
            .move_rule(b, &NatRuleMoveModel::before(NatRulebase::Post, d))
            .unwrap();
        assert_eq!(order(&table, NatRulebase::Pre), ["c", "a"]);
        assert_eq!(order(&table, NatRulebase::Post), ["b", "d"]);
        assert_eq!(table.rulebase_of(b), Some(NatRulebase::Post));
        assert!(logs_contain("Moving NAT rule 'b'"));
    }

    #[test]
    fn rejected_moves_leave_table_untouched() {
        let mut table = NatRuleTable::new();
        let a = create(&mut table, NatRulebase::Pre, "a");
        let b = create(&mut table, NatRulebase::Pre, "b");
        let d = create(&mut table, NatRulebase::Post, "d");

        assert_eq!(
            table.move_rule(a, &NatRuleMoveModel::after(NatRulebase::Pre, a)),
            Err(ModelError::MoveRelativeToSelf(a))
        );
        // anchor in the other rulebase
        assert_eq!(
            table.move_rule(a, &NatRuleMoveModel::after(NatRulebase::Pre, d)),
            Err(ModelError::NoSuchRule(d))
        );
        let invalid = NatRuleMoveModel {
            destination_rule: None,
            ..NatRuleMoveModel::before(NatRulebase::Pre, b)
        };
        assert_eq!(
            table.move_rule(a, &invalid),
            Err(ModelError::MissingDestinationRule(NatMoveDestination::Before))
        );
        let ghost = NatRuleId::new();
        assert_eq!(
            table.move_rule(ghost, &NatRuleMoveModel::top(NatRulebase::Pre)),
            Err(ModelError::NoSuchRule(ghost))
        );
        assert_eq!(order(&table, NatRulebase::Pre), ["a", "b"]);
        assert_eq!(order(&table, NatRulebase::Post), ["d"]);
    }

    #[test]
    fn list_filters_and_scopes() {
        let mut table = NatRuleTable::new();
        create(&mut table, NatRulebase::Pre, "a");
        let mut b = base("b");
        b.container = Container::folder("All");
        b.disabled = true;
        table
            .create(NatRulebase::Pre, NatRuleCreateModel::new(b))
            .unwrap();
        create(&mut table, NatRulebase::Post, "c");

        let all = NatRuleFilter::new();
        let names = |rules: Vec<&NatRuleResponseModel>| -> Vec<String> {
            rules.into_iter().map(|r| r.base.name.clone()).collect()
        };
        assert_eq!(names(table.list(NatRulebase::Pre, &all, None)), ["a", "b"]);
        assert_eq!(
            names(table.list(NatRulebase::Pre, &NatRuleFilter::new().disabled(true), None)),
            ["b"]
        );
        let scope = ContainerScope::new(Container::folder("Texas"))
            .unwrap()
            .exact_match();
        assert_eq!(names(table.list(NatRulebase::Pre, &all, Some(&scope))), ["a"]);
        assert_eq!(names(table.list(NatRulebase::Post, &all, Some(&scope))), ["c"]);
    }
}
