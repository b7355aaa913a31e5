use super::*;

/// A caller-chosen layout, the config's mine count is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    coords: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(coords: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            coords: coords.into_iter().collect(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn mine_coords(self, _config: GameConfig) -> Vec<Coord2> {
        let mut coords: Vec<Coord2> = Vec::with_capacity(self.coords.len());
        for pos in self.coords {
            if coords.contains(&pos) {
                log::warn!("Duplicate mine at {:?} skipped", pos);
                continue;
            }
            coords.push(pos);
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_skipped() {
        let generator = FixedMinefieldGenerator::new([(0, 0), (1, 1), (0, 0)]);
        let coords = generator.mine_coords(GameConfig::new((3, 3), 0));

        assert_eq!(coords, [(0, 0), (1, 1)]);
    }
}
