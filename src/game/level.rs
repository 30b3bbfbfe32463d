// src/game/level.rs
use crate::ecs::Position;
use crate::error::{GameError, Result};

// Something buried under a tile, e.g. `gold 10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    pub name: String,
    pub param: i32,
}

impl ItemDescriptor {
    // Parse `"<name> <param>"`. Blank cells, `~` and descriptors without an
    // integer parameter mean "no item".
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let name = words.next()?;
        if name == "~" {
            return None;
        }
        let param = words.next()?.parse().ok()?;
        Some(Self {
            name: name.to_string(),
            param,
        })
    }
}

// Axis-aligned rectangle centered on (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

// A tile grid with an item layer on top of it
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    width: usize,
    height: usize,
    tiles: Vec<u16>,
    items: Vec<Option<ItemDescriptor>>,
    pub next_level: Option<String>,
    pub solids: Vec<Rect>,
}

impl Level {
    // Create a level filled with one tile value and no items
    pub fn new(width: usize, height: usize, fill: u16) -> Self {
        Self {
            name: String::new(),
            width,
            height,
            tiles: vec![fill; width * height],
            items: vec![None; width * height],
            next_level: None,
            solids: Vec::new(),
        }
    }

    // Build a level from row-major tile and item layers. The item layer may
    // be empty; otherwise it must have the tile layer's shape.
    pub fn from_rows(tiles: Vec<Vec<u16>>, items: Vec<Vec<String>>) -> Result<Self> {
        let height = tiles.len();
        let width = tiles.first().map_or(0, Vec::len);
        if tiles.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidLevel("tile rows differ in length".into()));
        }
        if !items.is_empty()
            && (items.len() != height || items.iter().any(|row| row.len() != width))
        {
            return Err(GameError::InvalidLevel(format!(
                "item layer does not match the {width}x{height} tile grid"
            )));
        }

        let mut level = Self::new(width, height, 0);
        level.tiles = tiles.into_iter().flatten().collect();
        for (r, row) in items.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let parsed = ItemDescriptor::parse(cell);
                if parsed.is_none() && !cell.trim().is_empty() && cell.trim() != "~" {
                    tracing::warn!(row = r, col = c, cell = %cell, "ignoring malformed item descriptor");
                }
                level.items[r * width + c] = parsed;
            }
        }
        Ok(level)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    // Get a tile at a specific position
    pub fn tile_at(&self, row: usize, col: usize) -> Option<u16> {
        self.index(row, col).map(|i| self.tiles[i])
    }

    // Set a tile at a specific position
    pub fn set_tile(&mut self, row: usize, col: usize, tile: u16) {
        if let Some(i) = self.index(row, col) {
            self.tiles[i] = tile;
        }
    }

    pub fn item_at(&self, row: usize, col: usize) -> Option<&ItemDescriptor> {
        self.index(row, col).and_then(|i| self.items[i].as_ref())
    }

    pub fn set_item(&mut self, row: usize, col: usize, item: Option<ItemDescriptor>) {
        if let Some(i) = self.index(row, col) {
            self.items[i] = item;
        }
    }

    // Remove and return the item buried at a cell.
    pub fn take_item(&mut self, row: usize, col: usize) -> Option<ItemDescriptor> {
        self.index(row, col).and_then(|i| self.items[i].take())
    }

    // Grid cell under a box: the row comes from the box edge at
    // `y - height/2`, the column from its center, both rounded to the
    // nearest cell.
    pub fn cell_under(&self, pos: &Position, tile_size: f64) -> Option<(usize, usize)> {
        let row = ((pos.position.y - pos.size.y / 2.0) / tile_size + 0.5).floor();
        let col = (pos.position.x / tile_size + 0.5).floor();
        if row < 0.0 || col < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        self.index(row, col).map(|_| (row, col))
    }

    // World position of a cell's center.
    pub fn cell_center(row: usize, col: usize, tile_size: f64) -> (f64, f64) {
        (col as f64 * tile_size, row as f64 * tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_item_descriptors() {
        assert_eq!(
            ItemDescriptor::parse("gold 10"),
            Some(ItemDescriptor { name: "gold".into(), param: 10 })
        );
        assert_eq!(ItemDescriptor::parse("  gem   -3 "), Some(ItemDescriptor { name: "gem".into(), param: -3 }));
        assert_eq!(ItemDescriptor::parse("~"), None);
        assert_eq!(ItemDescriptor::parse(""), None);
        assert_eq!(ItemDescriptor::parse("gold"), None);
        assert_eq!(ItemDescriptor::parse("gold lots"), None);
    }

    #[test]
    fn from_rows_rejects_ragged_grids() {
        let err = Level::from_rows(vec![vec![0, 0], vec![0]], vec![]).unwrap_err();
        assert!(matches!(err, GameError::InvalidLevel(_)));

        let err = Level::from_rows(vec![vec![0, 0]], vec![vec!["~".into()]]).unwrap_err();
        assert!(matches!(err, GameError::InvalidLevel(_)));
    }

    #[test]
    fn from_rows_keeps_layout() {
        let level = Level::from_rows(
            vec![vec![0, 1, 2], vec![3, 4, 5]],
            vec![
                vec!["~".into(), "gold 5".into(), "".into()],
                vec!["bad".into(), "~".into(), "gold 1".into()],
            ],
        )
        .unwrap();
        assert_eq!((level.width(), level.height()), (3, 2));
        assert_eq!(level.tile_at(1, 2), Some(5));
        assert_eq!(level.tile_at(2, 0), None);
        assert_eq!(level.item_at(0, 1).unwrap().param, 5);
        assert!(level.item_at(1, 0).is_none());
        assert_eq!(level.item_at(1, 2).unwrap().name, "gold");
    }

    #[test]
    fn cell_under_rounds_to_nearest() {
        let level = Level::new(4, 4, 0);
        let pos = Position::at(47.0, 64.0 + 12.0 + 15.0, 24.0, 24.0);
        assert_eq!(level.cell_under(&pos, 32.0), Some((2, 1)));

        let pos = Position::at(49.0, 64.0 + 12.0 + 17.0, 24.0, 24.0);
        assert_eq!(level.cell_under(&pos, 32.0), Some((3, 2)));
    }

    #[test]
    fn cell_under_outside_the_grid() {
        let level = Level::new(2, 2, 0);
        assert_eq!(level.cell_under(&Position::at(-40.0, 0.0, 8.0, 8.0), 32.0), None);
        assert_eq!(level.cell_under(&Position::at(200.0, 0.0, 8.0, 8.0), 32.0), None);
    }

    #[test]
    fn take_item_empties_the_cell() {
        let mut level = Level::new(1, 1, 0);
        level.set_item(0, 0, ItemDescriptor::parse("gold 3"));
        assert!(level.take_item(0, 0).is_some());
        assert!(level.take_item(0, 0).is_none());
    }
}
