/// Puller-Tabelle: welche Zahlen eine gefallene Zahl typischerweise "zieht"
///
/// Handgepflegte Domänen-Daten, nicht abgeleitet. Einträge dürfen Duplikate
/// und die Zahl selbst enthalten; für Trends wird die Selbstreferenz entfernt.
const PULLER_ENTRIES: [&[u8]; 37] = [
    &[10, 20, 30],    // 0
    &[17, 7],         // 1
    &[2, 22],         // 2
    &[3, 33],         // 3
    &[21, 9],         // 4
    &[25, 15, 35],    // 5
    &[20, 17, 7],     // 6
    &[7, 17, 20],     // 7
    &[30, 0, 20],     // 8
    &[9, 19],         // 9
    &[0, 20, 30],     // 10
    &[30, 0, 20],     // 11
    &[33, 15],        // 12
    &[20, 7],         // 13
    &[17, 7],         // 14
    &[35, 9, 5],      // 15
    &[3, 33],         // 16
    &[17, 20, 7],     // 17
    &[2, 22],         // 18
    &[19, 9],         // 19
    &[17, 7, 20],     // 20
    &[2, 22],         // 21
    &[2, 22],         // 22
    &[0, 10],         // 23
    &[35, 15, 25],    // 24
    &[20, 22],        // 25
    &[0, 10, 30],     // 26
    &[17, 7, 20],     // 27
    &[7, 17, 20],     // 28
    &[7, 17, 20],     // 29
    &[0, 20, 30],     // 30
    &[9, 19],         // 31
    &[0, 10, 20, 30], // 32
    &[3, 33],         // 33
    &[7, 20],         // 34
    &[3, 33, 15],     // 35
    &[20, 30],        // 36
];

/// Statische Zuordnung Zahl -> Puller-Ziele
#[derive(Debug, Clone)]
pub struct PullerTable {
    entries: [&'static [u8]; 37],
}

impl PullerTable {
    pub fn new() -> Self {
        Self {
            entries: PULLER_ENTRIES,
        }
    }

    /// Roher Tabelleneintrag, leer für Werte ausserhalb des Wertebereichs
    pub fn pullers(&self, value: u8) -> &[u8] {
        self.entries
            .get(value as usize)
            .copied()
            .unwrap_or(&[])
    }

    /// Trend-Ziele: Eintrag ohne Selbstreferenz
    pub fn trend_targets(&self, value: u8) -> Vec<u8> {
        self.pullers(value)
            .iter()
            .copied()
            .filter(|&target| target != value)
            .collect()
    }
}

impl Default for PullerTable {
    fn default() -> Self {
        Self::new()
    }
}
