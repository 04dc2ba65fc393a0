use super::wheel::Wheel;

/// Gruppiert Zahlen nach physischer Nähe auf dem Kessel (Single-Link)
///
/// Eine Zahl gehört zur Gruppe, sobald sie nahe an IRGENDEINEM bereits
/// aufgenommenen Mitglied liegt. Nach jeder Aufnahme startet der Scan von
/// vorn, damit spät aufgenommene Mitglieder weitere Zahlen nachziehen können.
/// Gruppen-Reihenfolge = Reihenfolge der Seed-Zahlen, Reihenfolge innerhalb
/// der Gruppe = Aufnahme-Reihenfolge.
pub fn group_by_proximity(wheel: &Wheel, values: &[u8], max_distance: u32) -> Vec<Vec<u8>> {
    let mut groups = Vec::new();
    let mut remaining: Vec<u8> = values.to_vec();

    while !remaining.is_empty() {
        let mut group = vec![remaining.remove(0)];

        let mut i = 0;
        while i < remaining.len() {
            let close_to_member = group
                .iter()
                .any(|&member| wheel.distance(remaining[i], member) <= max_distance);

            if close_to_member {
                group.push(remaining.remove(i));
                i = 0; // Scan neu starten
            } else {
                i += 1;
            }
        }

        groups.push(group);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_slots_form_one_group() {
        let wheel = Wheel::new();
        // 5, 24, 16 liegen auf Index 0, 1, 2 - paarweise innerhalb von 2
        let groups = group_by_proximity(&wheel, &[5, 24, 16], 2);
        assert_eq!(groups, vec![vec![5, 24, 16]]);
    }

    #[test]
    fn test_one_group_regardless_of_input_order() {
        let wheel = Wheel::new();
        for input in [[16, 5, 24], [24, 16, 5], [5, 16, 24]] {
            let groups = group_by_proximity(&wheel, &input, 2);
            assert_eq!(groups.len(), 1, "input {:?}", input);
            assert_eq!(groups[0].len(), 3);
        }
    }

    #[test]
    fn test_chained_absorption_via_restart() {
        let wheel = Wheel::new();
        // 33 (Index 3) zieht 20 (Index 5) nur über 1 (Index 4) nach:
        // Distanz 33-20 ist 2, 33-1 ist 1 - bei max_distance 1 braucht es
        // die Kette über 1, die erst nach dem Restart greift
        let groups = group_by_proximity(&wheel, &[33, 20, 1], 1);
        assert_eq!(groups, vec![vec![33, 1, 20]]);
    }

    #[test]
    fn test_distant_values_split_into_groups() {
        let wheel = Wheel::new();
        // 22 (Index 9) liegt weit weg von 0 (Index 18) und 15 (Index 20)
        let groups = group_by_proximity(&wheel, &[22, 0, 15], 3);
        assert_eq!(groups, vec![vec![22], vec![0, 15]]);
    }

    #[test]
    fn test_empty_input() {
        let wheel = Wheel::new();
        assert!(group_by_proximity(&wheel, &[], 3).is_empty());
    }
}
