mod iter;
mod sort;

use crate::slot::Slot;

use super::list::GenericList;

fn ints(list: &GenericList) -> Vec<i32> {
    list.to_vec()
        .iter()
        .map(|slot| slot.decode::<i32>().expect("list holds only i32 slots"))
        .collect()
}

fn filled(values: &[i32]) -> GenericList {
    values.iter().copied().map(Slot::from).collect()
}
