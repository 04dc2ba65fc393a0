use serde::{Deserialize, Serialize};

/// Sentinel-Distanz für Werte die nicht auf dem Kessel liegen
pub const FAR_AWAY: u32 = 999;

/// Physische Reihenfolge des Kessels (im Uhrzeigersinn, europäisches Layout)
pub const WHEEL_ORDER: [u8; 37] = [
    5, 24, 16, 33, 1, 20, 14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26, 0, 32,
    15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10,
];

const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

const BLACK_NUMBERS: [u8; 18] = [
    2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35,
];

/// Farbe eines Roulette-Felds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "red")]
    Red,
    #[serde(rename = "black")]
    Black,
    #[serde(rename = "green")]
    Green,
}

impl Color {
    pub fn as_str(&self) -> &str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }
}

/// Kessel-Topologie: Distanz- und Nachbarschafts-Primitive
///
/// Statisch, wird einmal beim Start gebaut und read-only weitergereicht.
#[derive(Debug, Clone)]
pub struct Wheel {
    order: [u8; 37],
    /// Index-Lookup: Wert -> Position im Kessel
    positions: [Option<usize>; 37],
}

impl Wheel {
    pub fn new() -> Self {
        let mut positions = [None; 37];
        for (idx, &value) in WHEEL_ORDER.iter().enumerate() {
            positions[value as usize] = Some(idx);
        }
        Self {
            order: WHEEL_ORDER,
            positions,
        }
    }

    /// Slot-Reihenfolge im Uhrzeigersinn
    pub fn slots(&self) -> &[u8; 37] {
        &self.order
    }

    /// Position eines Werts auf dem Kessel
    pub fn position_of(&self, value: u8) -> Option<usize> {
        self.positions.get(value as usize).copied().flatten()
    }

    /// Minimale Distanz zwischen zwei Werten (direkt vs. zirkulär)
    ///
    /// Liefert `FAR_AWAY` wenn einer der Werte nicht auf dem Kessel liegt.
    pub fn distance(&self, a: u8, b: u8) -> u32 {
        let (Some(idx_a), Some(idx_b)) = (self.position_of(a), self.position_of(b)) else {
            return FAR_AWAY;
        };

        let direct = idx_a.abs_diff(idx_b) as u32;
        let circular = self.order.len() as u32 - direct;

        direct.min(circular)
    }

    /// Zentrum plus Nachbarn bis `radius` Slots auf beiden Seiten
    ///
    /// Reihenfolge: Zentrum, dann pro Schritt erst gegen, dann im
    /// Uhrzeigersinn. Unbekannte Werte liefern nur sich selbst zurück.
    pub fn neighbors_within(&self, center: u8, radius: usize) -> Vec<u8> {
        let Some(index) = self.position_of(center) else {
            return vec![center];
        };

        let len = self.order.len();
        let mut collected = vec![center];

        for step in 1..=radius {
            let ccw = self.order[(index + len - (step % len)) % len];
            let cw = self.order[(index + step) % len];

            if !collected.contains(&ccw) {
                collected.push(ccw);
            }
            if !collected.contains(&cw) {
                collected.push(cw);
            }
        }

        collected
    }

    /// Farbe eines Felds (Präsentations-Kontrakt für das Frontend)
    pub fn color(&self, value: u8) -> Color {
        if RED_NUMBERS.contains(&value) {
            Color::Red
        } else if BLACK_NUMBERS.contains(&value) {
            Color::Black
        } else {
            Color::Green
        }
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_is_permutation() {
        let wheel = Wheel::new();
        for value in 0..=36u8 {
            assert!(wheel.position_of(value).is_some(), "missing {}", value);
        }
    }

    #[test]
    fn test_distance_direct_and_circular() {
        let wheel = Wheel::new();
        // 5 und 33 liegen 3 Slots auseinander (Index 0 und 3)
        assert_eq!(wheel.distance(5, 33), 3);
        // zirkulärer Weg ist kürzer: 5 (Index 0) und 10 (Index 36)
        assert_eq!(wheel.distance(5, 10), 1);
        assert_eq!(wheel.distance(22, 22), 0);
        // symmetrisch
        assert_eq!(wheel.distance(16, 0), wheel.distance(0, 16));
    }

    #[test]
    fn test_distance_sentinel_for_unknown_value() {
        let wheel = Wheel::new();
        assert_eq!(wheel.distance(99, 5), FAR_AWAY);
        assert_eq!(wheel.distance(5, 255), FAR_AWAY);
    }

    #[test]
    fn test_neighbors_within_order_and_size() {
        let wheel = Wheel::new();
        // 33 liegt auf Index 3: links 16, rechts 1
        assert_eq!(wheel.neighbors_within(33, 1), vec![33, 16, 1]);
        assert_eq!(wheel.neighbors_within(33, 2), vec![33, 16, 1, 24, 20]);
        assert_eq!(wheel.neighbors_within(33, 3), vec![33, 16, 1, 24, 20, 5, 14]);
    }

    #[test]
    fn test_neighbors_wrap_around() {
        let wheel = Wheel::new();
        // 5 liegt auf Index 0, der linke Nachbar ist das letzte Feld (10)
        assert_eq!(wheel.neighbors_within(5, 1), vec![5, 10, 24]);
    }

    #[test]
    fn test_neighbors_unknown_value_is_singleton() {
        let wheel = Wheel::new();
        assert_eq!(wheel.neighbors_within(42, 3), vec![42]);
    }

    #[test]
    fn test_colors() {
        let wheel = Wheel::new();
        assert_eq!(wheel.color(0), Color::Green);
        assert_eq!(wheel.color(1), Color::Red);
        assert_eq!(wheel.color(2), Color::Black);
        assert_eq!(wheel.color(36), Color::Red);
        assert_eq!(wheel.color(35), Color::Black);
    }
}
