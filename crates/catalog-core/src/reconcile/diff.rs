// ============================================================================
// Catalog Core - Diff Engine
// File: crates/catalog-core/src/reconcile/diff.rs
// Description: Candidate tree vs. live tree -> insert/update/delete sets
// ============================================================================
//! Identity is the id alone. The live tree is walked menu -> submenus ->
//! dishes; each live entity either disappears from the candidate maps
//! (unchanged), turns into an update (any compared field differs, the parent
//! reference included), or is scheduled for deletion. Whatever is left in the
//! candidate maps afterwards is new.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::{
    normalize_price, CatalogRoot, DishKind, DishScope, EntityKind, MenuKind, MenuNode, MenuScope,
    SubmenuKind, SubmenuNode, SubmenuScope,
};
use crate::import::{CandidateDish, CandidateTree};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert<K: EntityKind> {
    pub parent: K::Parent,
    pub id: Uuid,
    pub fields: K::Fields,
}

impl<K: EntityKind> Insert<K> {
    pub fn scope(&self) -> K::Scope {
        K::scope(self.parent, self.id)
    }
}

/// `scope` is the chain after the update, `previous` the live one; they
/// differ when the entity moves to another parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<K: EntityKind> {
    pub scope: K::Scope,
    pub previous: K::Scope,
    pub fields: K::Fields,
}

/// Chain as it will exist once the update phase has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete<K: EntityKind> {
    pub scope: K::Scope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionSet<K: EntityKind> {
    pub insert: Vec<Insert<K>>,
    pub update: Vec<Update<K>>,
    pub delete: Vec<Delete<K>>,
}

impl<K: EntityKind> Default for ActionSet<K> {
    fn default() -> Self {
        Self {
            insert: Vec::new(),
            update: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<K: EntityKind> ActionSet<K> {
    pub fn len(&self) -> usize {
        self.insert.len() + self.update.len() + self.delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPlan {
    pub menus: ActionSet<MenuKind>,
    pub submenus: ActionSet<SubmenuKind>,
    pub dishes: ActionSet<DishKind>,
}

impl ActionPlan {
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty() && self.submenus.is_empty() && self.dishes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.menus.len() + self.submenus.len() + self.dishes.len()
    }
}

/// Compute the actions that turn `live` into `candidate`.
pub fn diff(candidate: CandidateTree, live: &[MenuNode]) -> ActionPlan {
    let CandidateTree {
        mut menus,
        mut submenus,
        mut dishes,
    } = candidate;
    let mut plan = ActionPlan::default();

    for menu in live {
        let scope = MenuScope::new(menu.id);
        match menus.remove(&menu.id) {
            None => plan.menus.delete.push(Delete { scope }),
            Some(wanted) => {
                if wanted.fields.title != menu.title || wanted.fields.description != menu.description {
                    plan.menus.update.push(Update {
                        scope,
                        previous: scope,
                        fields: wanted.fields,
                    });
                }
            }
        }

        for submenu in &menu.submenus {
            let previous = scope.submenu(submenu.id);
            // Menu the submenu belongs to once updates are applied.
            let settled = match submenus.remove(&submenu.id) {
                None => {
                    plan.submenus.delete.push(Delete { scope: previous });
                    previous
                }
                Some(wanted) => {
                    let next = SubmenuScope::new(wanted.menu_id, submenu.id);
                    if next != previous
                        || wanted.fields.title != submenu.title
                        || wanted.fields.description != submenu.description
                    {
                        plan.submenus.update.push(Update {
                            scope: next,
                            previous,
                            fields: wanted.fields,
                        });
                    }
                    next
                }
            };

            diff_dishes(&mut plan, &mut dishes, submenu, previous, settled);
        }
    }

    plan.menus.insert = menus
        .into_iter()
        .map(|(id, wanted)| Insert {
            parent: CatalogRoot,
            id,
            fields: wanted.fields,
        })
        .collect();
    plan.submenus.insert = submenus
        .into_iter()
        .map(|(id, wanted)| Insert {
            parent: MenuScope::new(wanted.menu_id),
            id,
            fields: wanted.fields,
        })
        .collect();
    plan.dishes.insert = dishes
        .into_iter()
        .map(|(id, wanted)| Insert {
            parent: SubmenuScope::new(wanted.menu_id, wanted.submenu_id),
            id,
            fields: wanted.fields,
        })
        .collect();

    plan
}

fn diff_dishes(
    plan: &mut ActionPlan,
    dishes: &mut BTreeMap<Uuid, CandidateDish>,
    submenu: &SubmenuNode,
    previous: SubmenuScope,
    settled: SubmenuScope,
) {
    for dish in &submenu.dishes {
        match dishes.remove(&dish.id) {
            None => plan.dishes.delete.push(Delete {
                scope: settled.dish(dish.id),
            }),
            Some(wanted) => {
                // Only the submenu reference is stored on a dish.
                if wanted.submenu_id != dish.submenu_id
                    || wanted.fields.title != dish.title
                    || wanted.fields.description != dish.description
                    || normalize_price(wanted.fields.price) != normalize_price(dish.price)
                {
                    plan.dishes.update.push(Update {
                        scope: DishScope::new(wanted.menu_id, wanted.submenu_id, dish.id),
                        previous: previous.dish(dish.id),
                        fields: wanted.fields,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dish, DishFields, MenuFields, SubmenuFields};
    use crate::import::{CandidateMenu, CandidateSubmenu};
    use rust_decimal::Decimal;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    const M1: u128 = 1;
    const M2: u128 = 2;
    const S1: u128 = 11;
    const S2: u128 = 12;
    const D1: u128 = 101;
    const D2: u128 = 102;

    fn live_dish(id: u128, submenu: u128, title: &str, price: Decimal) -> Dish {
        Dish {
            id: uid(id),
            submenu_id: uid(submenu),
            title: title.into(),
            description: format!("{title} description"),
            price,
        }
    }

    fn live_submenu(id: u128, title: &str, dishes: Vec<Dish>) -> SubmenuNode {
        SubmenuNode {
            id: uid(id),
            title: title.into(),
            description: format!("{title} description"),
            dishes,
        }
    }

    fn live_menu(id: u128, title: &str, submenus: Vec<SubmenuNode>) -> MenuNode {
        MenuNode {
            id: uid(id),
            title: title.into(),
            description: format!("{title} description"),
            submenus,
        }
    }

    /// Candidate mirroring `live` exactly.
    fn mirror(live: &[MenuNode]) -> CandidateTree {
        let mut tree = CandidateTree::default();
        for menu in live {
            tree.menus.insert(
                menu.id,
                CandidateMenu {
                    fields: MenuFields::new(&menu.title, &menu.description),
                },
            );
            for submenu in &menu.submenus {
                tree.submenus.insert(
                    submenu.id,
                    CandidateSubmenu {
                        menu_id: menu.id,
                        fields: SubmenuFields::new(&submenu.title, &submenu.description),
                    },
                );
                for dish in &submenu.dishes {
                    tree.dishes.insert(
                        dish.id,
                        CandidateDish {
                            menu_id: menu.id,
                            submenu_id: submenu.id,
                            fields: DishFields::new(&dish.title, &dish.description, dish.price),
                        },
                    );
                }
            }
        }
        tree
    }

    fn lunch() -> Vec<MenuNode> {
        vec![live_menu(
            M1,
            "Lunch",
            vec![
                live_submenu(
                    S1,
                    "Soups",
                    vec![live_dish(D1, S1, "Tomato", Decimal::new(1250, 2))],
                ),
                live_submenu(S2, "Salads", vec![]),
            ],
        )]
    }

    #[test]
    fn test_unchanged_tree_yields_empty_plan() {
        let live = lunch();
        let plan = diff(mirror(&live), &live);

        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_price_scale_is_not_a_change() {
        let live = lunch();
        let mut candidate = mirror(&live);
        candidate.dishes.get_mut(&uid(D1)).unwrap().fields.price = Decimal::new(125, 1);

        assert!(diff(candidate, &live).is_empty());
    }

    #[test]
    fn test_menu_title_change_is_an_update() {
        let live = lunch();
        let mut candidate = mirror(&live);
        candidate.menus.get_mut(&uid(M1)).unwrap().fields.title = "Dinner".into();

        let plan = diff(candidate, &live);

        assert_eq!(plan.menus.update.len(), 1);
        let update = &plan.menus.update[0];
        assert_eq!(update.scope, MenuScope::new(uid(M1)));
        assert_eq!(update.previous, update.scope);
        assert_eq!(update.fields.title, "Dinner");
        assert!(plan.menus.insert.is_empty());
        assert!(plan.menus.delete.is_empty());
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_omitted_dish_is_deleted_with_its_chain() {
        let live = lunch();
        let mut candidate = mirror(&live);
        candidate.dishes.remove(&uid(D1));

        let plan = diff(candidate, &live);

        assert_eq!(
            plan.dishes.delete,
            vec![Delete {
                scope: DishScope::new(uid(M1), uid(S1), uid(D1))
            }]
        );
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_reparented_dish_keeps_its_identity() {
        let live = lunch();
        let mut candidate = mirror(&live);
        candidate.dishes.get_mut(&uid(D1)).unwrap().submenu_id = uid(S2);

        let plan = diff(candidate, &live);

        assert!(plan.dishes.insert.is_empty());
        assert!(plan.dishes.delete.is_empty());
        assert_eq!(plan.dishes.update.len(), 1);
        let update = &plan.dishes.update[0];
        assert_eq!(update.scope, DishScope::new(uid(M1), uid(S2), uid(D1)));
        assert_eq!(update.previous, DishScope::new(uid(M1), uid(S1), uid(D1)));
    }

    #[test]
    fn test_new_entities_are_inserted_under_their_parents() {
        let live = lunch();
        let mut candidate = mirror(&live);
        candidate.menus.insert(
            uid(M2),
            CandidateMenu {
                fields: MenuFields::new("Dinner", "Evening"),
            },
        );
        candidate.dishes.insert(
            uid(D2),
            CandidateDish {
                menu_id: uid(M1),
                submenu_id: uid(S2),
                fields: DishFields::new("Caesar", "Chicken", Decimal::new(9, 0)),
            },
        );

        let plan = diff(candidate, &live);

        assert_eq!(plan.menus.insert.len(), 1);
        assert_eq!(plan.menus.insert[0].id, uid(M2));
        assert_eq!(plan.dishes.insert.len(), 1);
        assert_eq!(
            plan.dishes.insert[0].scope(),
            DishScope::new(uid(M1), uid(S2), uid(D2))
        );
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_submenu_moved_out_of_deleted_menu() {
        let mut live = lunch();
        live.push(live_menu(M2, "Dinner", vec![]));
        let mut candidate = mirror(&live);
        candidate.menus.remove(&uid(M1));
        candidate.submenus.remove(&uid(S2));
        candidate.submenus.get_mut(&uid(S1)).unwrap().menu_id = uid(M2);
        candidate.dishes.remove(&uid(D1));

        let plan = diff(candidate, &live);

        assert_eq!(plan.menus.delete, vec![Delete { scope: MenuScope::new(uid(M1)) }]);
        assert_eq!(plan.submenus.update.len(), 1);
        assert_eq!(plan.submenus.update[0].scope, SubmenuScope::new(uid(M2), uid(S1)));
        assert_eq!(plan.submenus.update[0].previous, SubmenuScope::new(uid(M1), uid(S1)));
        assert_eq!(
            plan.submenus.delete,
            vec![Delete {
                scope: SubmenuScope::new(uid(M1), uid(S2))
            }]
        );
        // Deleted after S1 has moved, so addressed through the new menu.
        assert_eq!(
            plan.dishes.delete,
            vec![Delete {
                scope: DishScope::new(uid(M2), uid(S1), uid(D1))
            }]
        );
    }

    #[test]
    fn test_empty_candidate_deletes_everything() {
        let live = lunch();
        let plan = diff(CandidateTree::default(), &live);

        assert_eq!(plan.menus.delete.len(), 1);
        assert_eq!(plan.submenus.delete.len(), 2);
        assert_eq!(plan.dishes.delete.len(), 1);
        assert!(plan.menus.insert.is_empty() && plan.menus.update.is_empty());
    }
}
