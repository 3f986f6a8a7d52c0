//! The textual move-literal grammar of §6: `<from>,<to>` optionally followed by a
//! tile literal `<file><rank><color>`. The spec does not name a separator between the
//! motion and the tile literal; this implementation uses a single space, matching the
//! teacher's own whitespace-tokenised command grammar (`ltp_server`'s `cmdstr.split_whitespace()`).

use std::fmt;
use std::str::FromStr;

use crate::core::consts::TileType;
use crate::core::coord::Coord;
use crate::core::rules::{Move, Placement};
use crate::errors::ContrastError;

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.from, self.to)?;
        if let Some(p) = self.placement {
            let colour = match p.tile {
                TileType::Black => 'b',
                TileType::Gray => 'g',
                TileType::None => unreachable!("a placement never carries TileType::None"),
            };
            write!(f, " {}{}", p.at, colour)?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ContrastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, ' ');
        let motion = parts.next().unwrap_or("");
        let (from_str, to_str) = motion
            .split_once(',')
            .ok_or_else(|| ContrastError::OutOfRangeCoord(s.to_string()))?;
        let from: Coord = from_str.parse()?;
        let to: Coord = to_str.parse()?;

        let placement = match parts.next() {
            None => None,
            Some(tile_literal) => {
                if tile_literal.len() < 3 {
                    return Err(ContrastError::OutOfRangeCoord(s.to_string()));
                }
                let (coord_str, colour_str) = tile_literal.split_at(tile_literal.len() - 1);
                let at: Coord = coord_str.parse()?;
                let tile = match colour_str {
                    "b" | "B" => TileType::Black,
                    "g" | "G" => TileType::Gray,
                    _ => return Err(ContrastError::OutOfRangeCoord(s.to_string())),
                };
                Some(Placement { at, tile })
            }
        };

        Ok(Move { from, to, placement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_move_round_trips() {
        let mv = Move::base(Coord::new(0, 4), Coord::new(0, 3));
        let text = mv.to_string();
        assert_eq!(text, "a1,a2");
        assert_eq!(text.parse::<Move>().unwrap(), mv);
    }

    #[test]
    fn placement_move_round_trips() {
        let mv = Move {
            from: Coord::new(0, 4),
            to: Coord::new(0, 3),
            placement: Some(Placement {
                at: Coord::new(2, 2),
                tile: TileType::Gray,
            }),
        };
        let text = mv.to_string();
        assert_eq!(text, "a1,a2 c3g");
        assert_eq!(text.parse::<Move>().unwrap(), mv);
    }
}
