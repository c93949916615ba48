use core::hash::Hash;
use im::{HashMap, Vector};

pub trait OrDefault<K, V> {
    fn get_or_default(&self, item: &K) -> V;
}

impl<K, V> OrDefault<K, V> for HashMap<K, V>
where
    K: Eq + PartialEq + Hash,
    V: Default + Clone,
{
    fn get_or_default(&self, item: &K) -> V {
        match self.get(item) {
            Some(v) => v.clone(),
            None => V::default(),
        }
    }
}

pub trait PushImmut<T> {
    fn push(&self, item: T) -> Vector<T>;
}
impl<T: Clone> PushImmut<T> for Vector<T> {
    fn push(&self, item: T) -> Vector<T> {
        let mut result = self.clone();
        result.push_back(item);
        result
    }
}

pub trait InsertIfAbsent<K, V> {
    /// Returns a map holding `value` under `key`, unless `key` is already present, in
    /// which case the map is returned unchanged.
    fn insert_if_absent(&self, key: K, value: V) -> HashMap<K, V>;
}
impl<K, V> InsertIfAbsent<K, V> for HashMap<K, V>
where
    K: Eq + PartialEq + Hash + Clone,
    V: Clone,
{
    fn insert_if_absent(&self, key: K, value: V) -> HashMap<K, V> {
        if self.contains_key(&key) {
            self.clone()
        } else {
            self.update(key, value)
        }
    }
}
