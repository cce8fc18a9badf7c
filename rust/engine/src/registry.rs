use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use rand::Rng;
use thiserror::Error;

use crate::game::Game;
use crate::player::PlayerId;

pub type GameCode = String;

const CODE_LEN: usize = 4;

/// Games of one process, keyed by their join code.
///
/// Each game sits behind its own mutex, so events on one game are applied one
/// at a time while different games proceed independently.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameCode, Arc<Mutex<Game>>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game under a fresh four-letter code.
    pub fn create(
        &self,
        host: PlayerId,
        seed: Option<u64>,
        name: Option<String>,
    ) -> Result<GameCode, RegistryError> {
        let mut guard = self
            .games
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        let mut rng = rand::rng();
        let code = loop {
            let code: String = (0..CODE_LEN)
                .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
                .collect();
            if !guard.contains_key(&code) {
                break code;
            }
        };

        let mut game = Game::new(code.clone(), host, seed);
        if let Some(name) = name {
            game.set_name(name);
        }
        guard.insert(code.clone(), Arc::new(Mutex::new(game)));
        tracing::info!(game_id = %code, "game created");
        Ok(code)
    }

    pub fn get(&self, code: &str) -> Result<Arc<Mutex<Game>>, RegistryError> {
        let guard = self
            .games
            .read()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        guard
            .get(code)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// Runs `f` with exclusive access to one game.
    pub fn with_game<R>(
        &self,
        code: &str,
        f: impl FnOnce(&mut Game) -> R,
    ) -> Result<R, RegistryError> {
        let game = self.get(code)?;
        let mut guard = game.lock().map_err(|_| RegistryError::StoragePoisoned)?;
        Ok(f(&mut guard))
    }

    pub fn list(&self) -> Result<Vec<GameCode>, RegistryError> {
        let guard = self
            .games
            .read()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        let mut codes: Vec<GameCode> = guard.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }

    pub fn remove(&self, code: &str) -> Result<(), RegistryError> {
        let mut guard = self
            .games
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        match guard.remove(code) {
            Some(_) => {
                tracing::info!(game_id = %code, "game removed");
                Ok(())
            }
            None => Err(RegistryError::NotFound(code.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Game not found: {0}")]
    NotFound(GameCode),
    #[error("Game storage poisoned")]
    StoragePoisoned,
}
