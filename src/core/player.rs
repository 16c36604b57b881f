//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe firm identifier. A market has 2-10 firms.
//!
//! ## PlayerMap
//!
//! Per-player values (points, profits, quality constants) backed by a `Vec`
//! for O(1) access. Supports iteration and indexing by `PlayerId`.

use std::ops::{Index, IndexMut};

/// Player identifier.
///
/// Player indices are 0-based: the first firm is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next player in seating order, wrapping around.
    ///
    /// ```
    /// use bertrand_oligopoly::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Positive seat distance from `origin` to `self`.
    ///
    /// `origin` itself maps to 0, the player after it to 1, and so on.
    #[must_use]
    pub fn relative_to(self, origin: PlayerId, player_count: usize) -> usize {
        (player_count + self.index() - origin.index()) % player_count
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use bertrand_oligopoly::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Iterate over all players starting from `self` (self first).
    pub fn rotation(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).scan(self, move |player, _| {
            let current = *player;
            *player = current.next(player_count);
            Some(current)
        })
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use bertrand_oligopoly::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<f64> = PlayerMap::with_value(3, 0.0);
/// points[PlayerId::new(1)] += 0.25;
/// assert_eq!(points[PlayerId::new(1)], 0.25);
/// assert_eq!(points.as_slice(), &[0.0, 0.25, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Values in player order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Consume the map, returning values in player order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for PlayerMap<T> {
    fn from(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        Self { data }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "P1");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(9).next(10), PlayerId::new(0));
    }

    #[test]
    fn test_relative_to() {
        // Seen from player 2 in a 4-player market.
        let origin = PlayerId::new(2);
        assert_eq!(PlayerId::new(2).relative_to(origin, 4), 0);
        assert_eq!(PlayerId::new(3).relative_to(origin, 4), 1);
        assert_eq!(PlayerId::new(0).relative_to(origin, 4), 2);
        assert_eq!(PlayerId::new(1).relative_to(origin, 4), 3);
    }

    #[test]
    fn test_rotation_self_first() {
        let order: Vec<_> = PlayerId::new(1).rotation(3).collect();
        assert_eq!(order, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]);

        let order: Vec<_> = PlayerId::new(0).rotation(2).collect();
        assert_eq!(order, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(4, |p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<f64> = PlayerMap::with_value(2, 0.0);

        map[PlayerId::new(0)] += 1.5;
        map[PlayerId::new(1)] -= 0.5;

        assert_eq!(map.as_slice(), &[1.5, -0.5]);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], (PlayerId::new(0), &0));
        assert_eq!(pairs[2], (PlayerId::new(2), &2));
    }

    #[test]
    fn test_player_map_from_vec() {
        let map = PlayerMap::from(vec![1.0, 2.0]);
        assert_eq!(map.player_count(), 2);
        assert_eq!(map.into_vec(), vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
