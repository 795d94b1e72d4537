// ============================================================================
// Catalog Core - Import Parser
// File: crates/catalog-core/src/import/parser.rs
// Description: Sparse hierarchical sheet -> candidate tree
// ============================================================================
//! Rows inherit the most recent menu and submenu above them:
//!
//! | col 0   | col 1      | col 2      | col 3      | col 4 | col 5 |
//! |---------|------------|------------|------------|-------|-------|
//! | menu id | title      | desc       |            |       |       |
//! |         | submenu id | title      | desc       |       |       |
//! |         |            | dish id    | title      | desc  | price |
//!
//! The parse is a fold over the rows; the only state carried between rows is
//! the current context, and the result is three id-keyed maps.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use super::ImportRow;
use crate::domain::{price::parse_price, DishFields, MenuFields, SubmenuFields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMenu {
    pub fields: MenuFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSubmenu {
    pub menu_id: Uuid,
    pub fields: SubmenuFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDish {
    pub menu_id: Uuid,
    pub submenu_id: Uuid,
    pub fields: DishFields,
}

/// The catalog as the import describes it, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateTree {
    pub menus: BTreeMap<Uuid, CandidateMenu>,
    pub submenus: BTreeMap<Uuid, CandidateSubmenu>,
    pub dishes: BTreeMap<Uuid, CandidateDish>,
}

impl CandidateTree {
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty() && self.submenus.is_empty() && self.dishes.is_empty()
    }
}

pub fn parse_rows(rows: Vec<ImportRow>) -> CandidateTree {
    let state = rows.iter().fold(ParseState::default(), ParseState::accept);
    debug!(
        "Parsed import: {} menus, {} submenus, {} dishes, {} rows discarded",
        state.tree.menus.len(),
        state.tree.submenus.len(),
        state.tree.dishes.len(),
        state.discarded
    );
    state.tree
}

#[derive(Default)]
struct ParseState {
    menu: Option<Uuid>,
    submenu: Option<Uuid>,
    tree: CandidateTree,
    discarded: usize,
}

enum RowKind {
    Menu,
    Submenu,
    Dish,
}

/// The first populated column decides the level. Missing cells after it make
/// the row malformed rather than a row of another level.
fn classify(row: &ImportRow) -> Option<RowKind> {
    match (0..3).find(|&column| row.cell(column).is_some())? {
        0 => Some(RowKind::Menu),
        1 => Some(RowKind::Submenu),
        _ => Some(RowKind::Dish),
    }
}

fn parse_id(row: &ImportRow, column: usize) -> Option<Uuid> {
    row.cell(column).and_then(|raw| Uuid::parse_str(raw).ok())
}

impl ParseState {
    fn accept(mut self, row: &ImportRow) -> Self {
        match classify(row) {
            Some(RowKind::Menu) => self.accept_menu(row),
            Some(RowKind::Submenu) => self.accept_submenu(row),
            Some(RowKind::Dish) => self.accept_dish(row),
            None if row.is_blank() => {}
            None => self.discard(row, "unrecognized column layout"),
        }
        self
    }

    fn accept_menu(&mut self, row: &ImportRow) {
        // A new menu always closes the previous submenu.
        self.menu = None;
        self.submenu = None;

        let Some(id) = parse_id(row, 0) else {
            return self.discard(row, "invalid menu id");
        };
        let fields = MenuFields::new(row.cell(1).unwrap_or_default(), row.cell(2).unwrap_or_default());
        if let Err(e) = fields.validate() {
            return self.discard(row, &e.to_string());
        }

        self.tree.menus.insert(id, CandidateMenu { fields });
        self.menu = Some(id);
    }

    fn accept_submenu(&mut self, row: &ImportRow) {
        self.submenu = None;

        let Some(menu_id) = self.menu else {
            return self.discard(row, "submenu row outside a menu");
        };
        let Some(id) = parse_id(row, 1) else {
            return self.discard(row, "invalid submenu id");
        };
        let fields = SubmenuFields::new(row.cell(2).unwrap_or_default(), row.cell(3).unwrap_or_default());
        if let Err(e) = fields.validate() {
            return self.discard(row, &e.to_string());
        }

        self.tree.submenus.insert(id, CandidateSubmenu { menu_id, fields });
        self.submenu = Some(id);
    }

    fn accept_dish(&mut self, row: &ImportRow) {
        let (Some(menu_id), Some(submenu_id)) = (self.menu, self.submenu) else {
            return self.discard(row, "dish row outside a submenu");
        };
        let Some(id) = parse_id(row, 2) else {
            return self.discard(row, "invalid dish id");
        };
        let Some(price) = row.cell(5).and_then(parse_price) else {
            return self.discard(row, "invalid price");
        };
        let fields = DishFields::new(row.cell(3).unwrap_or_default(), row.cell(4).unwrap_or_default(), price);
        if let Err(e) = fields.validate() {
            return self.discard(row, &e.to_string());
        }

        self.tree.dishes.insert(
            id,
            CandidateDish {
                menu_id,
                submenu_id,
                fields,
            },
        );
    }

    fn discard(&mut self, row: &ImportRow, reason: &str) {
        warn!("Discarding import row {}: {}", row.number, reason);
        self.discarded += 1;
    }
}
