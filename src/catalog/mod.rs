//! Static reference data: items, skills, talents and the prestige tree.
//!
//! The catalog is built once on first use and shared for the life of the
//! process. Items form a recipe DAG stored in an arena indexed by
//! [`ItemId`]; recursive costs are resolved once at build time.

pub mod bonus;
pub mod items;
pub mod prestige_tree;
pub mod skills;
pub mod talents;

pub use bonus::*;
pub use items::*;
pub use prestige_tree::*;
pub use skills::*;
pub use talents::*;

use std::sync::OnceLock;

#[derive(Debug)]
pub struct Catalog {
    items: Vec<ItemDef>,
    total_costs: Vec<u64>,
    skills: Vec<SkillDef>,
    talents: Vec<TalentDef>,
    nodes: Vec<PrestigeNodeDef>,
}

/// Shared catalog instance.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::build)
}

impl Catalog {
    fn build() -> Self {
        let items = item_table();
        let mut memo = vec![None; items.len()];
        for item in &items {
            resolve_total_cost(&items, item.id, &mut memo);
        }
        let total_costs = memo.into_iter().map(|c| c.unwrap_or(0)).collect();

        Self {
            items,
            total_costs,
            skills: skill_table(),
            talents: talent_table(),
            nodes: node_table(),
        }
    }

    pub fn item(&self, id: ItemId) -> &ItemDef {
        &self.items[id.index()]
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }

    /// Own cost plus the total cost of every component, recursively.
    pub fn total_cost(&self, id: ItemId) -> u64 {
        self.total_costs[id.index()]
    }

    /// Craftable items in catalog order.
    pub fn recipes(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.iter().filter(|item| item.is_craftable())
    }

    pub fn skill(&self, id: SkillId) -> &SkillDef {
        &self.skills[id as usize]
    }

    pub fn skills(&self) -> &[SkillDef] {
        &self.skills
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn talent(&self, id: TalentId) -> &TalentDef {
        &self.talents[id as usize]
    }

    pub fn talents_at(&self, milestone: u32) -> impl Iterator<Item = &TalentDef> {
        self.talents.iter().filter(move |t| t.milestone == milestone)
    }

    pub fn node(&self, id: NodeId) -> &PrestigeNodeDef {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[PrestigeNodeDef] {
        &self.nodes
    }
}

fn resolve_total_cost(items: &[ItemDef], id: ItemId, memo: &mut [Option<u64>]) -> u64 {
    if let Some(cost) = memo[id.index()] {
        return cost;
    }
    let item = &items[id.index()];
    let components: u64 = item
        .components
        .iter()
        .map(|&c| resolve_total_cost(items, c, memo))
        .sum();
    let total = item.cost + components;
    memo[id.index()] = Some(total);
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_order_matches_ids() {
        let cat = catalog();
        assert_eq!(cat.items().len(), ItemId::COUNT);
        for (i, item) in cat.items().iter().enumerate() {
            assert_eq!(item.id.index(), i);
        }
        for (i, talent) in cat.talents.iter().enumerate() {
            assert_eq!(talent.id as usize, i);
        }
    }

    #[test]
    fn test_basic_item_total_is_own_cost() {
        assert_eq!(catalog().total_cost(ItemId::Claymore), 1350);
    }

    #[test]
    fn test_crafted_total_cost_is_recursive() {
        let cat = catalog();
        assert_eq!(cat.item(ItemId::Sange).cost, 0);
        assert_eq!(cat.total_cost(ItemId::Sange), 450 + 1000 + 550);
        assert_eq!(cat.total_cost(ItemId::Yasha), 450 + 1000 + 550);
        assert_eq!(cat.total_cost(ItemId::SangeYasha), 4000);
        // Two hammers and a blight stone
        assert_eq!(cat.total_cost(ItemId::Desolator), 1600 * 2 + 300);
    }

    #[test]
    fn test_components_always_cheaper_than_result() {
        let cat = catalog();
        for recipe in cat.recipes() {
            for &c in recipe.components {
                assert!(cat.total_cost(c) < cat.total_cost(recipe.id));
            }
        }
    }

    #[test]
    fn test_talents_two_per_milestone() {
        for milestone in TALENT_MILESTONES {
            assert_eq!(catalog().talents_at(milestone).count(), 2);
        }
    }

    #[test]
    fn test_blink_is_locked() {
        assert_eq!(catalog().skill(SkillId::Blink).kind, SkillKind::Locked);
        assert_eq!(catalog().skill_count(), 4);
    }
}
