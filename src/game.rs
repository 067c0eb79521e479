//! In-game session: the world, the player and the timers that drive them.

use blockadventure_core::{
    HotbarSlot, ItemId, Material, NewItem, SimTick, StoreAction, StoreHandle,
};
use blockadventure_world::{
    BlockFace, BlockPos, MineOutcome, PlaceError, Scheduler, World, WorldSettings,
};
use glam::Vec3;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::commands::CommandContext;
use crate::config::{GameConfig, PlayerConfig};
use crate::hud::HudView;
use crate::input::{Action, Bindings};
use crate::player::{Direction, Player};

/// Work queued on the session scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    Land,
    SyncPosition,
}

/// Something observable that happened during the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Moved { position: Vec3 },
    Jumped { height: f32 },
    Landed,
    ControlsToggled { visible: bool },
    BlockDamaged { pos: BlockPos, remaining: i32 },
    BlockMined { pos: BlockPos, material: Material },
    BlockPlaced { pos: BlockPos, material: Material },
    StoreCommit { revision: u64, action: StoreAction },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Moved { .. } => "Moved",
            SessionEvent::Jumped { .. } => "Jumped",
            SessionEvent::Landed => "Landed",
            SessionEvent::ControlsToggled { .. } => "ControlsToggled",
            SessionEvent::BlockDamaged { .. } => "BlockDamaged",
            SessionEvent::BlockMined { .. } => "BlockMined",
            SessionEvent::BlockPlaced { .. } => "BlockPlaced",
            SessionEvent::StoreCommit { .. } => "StoreCommit",
        }
    }
}

/// Why a placement did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no item in the selected hotbar slot")]
    EmptySlot,
    #[error("{0} cannot be placed")]
    NotPlaceable(String),
    #[error(transparent)]
    World(#[from] PlaceError),
}

pub struct GameSession {
    store: StoreHandle,
    world: World,
    player: Player,
    bindings: Bindings,
    scheduler: Scheduler<SessionTimer>,
    player_config: PlayerConfig,
    controls_visible: bool,
    events: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(store: StoreHandle, config: &GameConfig) -> Self {
        Self::with_world(store, config, &config.world.settings())
    }

    pub fn with_world(store: StoreHandle, config: &GameConfig, settings: &WorldSettings) -> Self {
        let world = World::generate(settings);
        info!(
            seed = world.seed(),
            sync_ms = config.player.position_sync_ms,
            "Session started"
        );

        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(
            SimTick::ticks_for_millis(config.player.position_sync_ms),
            SessionTimer::SyncPosition,
        );

        Self {
            store,
            world,
            player: Player::new(&config.player),
            bindings: Bindings::from_config(config),
            scheduler,
            player_config: config.player.clone(),
            controls_visible: true,
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn now(&self) -> SimTick {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn hud(&self) -> HudView {
        HudView::from_state(&self.store.snapshot(), self.controls_visible)
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Commit a store action and record it.
    pub fn dispatch(&mut self, action: StoreAction) {
        self.store.dispatch(action.clone());
        self.events.push(SessionEvent::StoreCommit {
            revision: self.store.revision(),
            action,
        });
    }

    /// Resolve a key press through the bindings and apply it.
    pub fn handle_key(&mut self, key: &str) -> Option<Action> {
        let action = self.bindings.action_for_key(key)?;
        self.apply_action(action);
        Some(action)
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::MoveForward => self.step(Direction::Forward),
            Action::MoveBackward => self.step(Direction::Backward),
            Action::MoveLeft => self.step(Direction::Left),
            Action::MoveRight => self.step(Direction::Right),
            Action::Jump => {
                self.jump();
            }
            Action::ToggleControls => self.toggle_controls(),
            Action::HotbarSlot(index) => {
                if let Some(slot) = HotbarSlot::new(index as usize) {
                    self.select_slot(slot);
                }
            }
        }
    }

    fn step(&mut self, direction: Direction) {
        self.player.step(direction);
        self.events.push(SessionEvent::Moved {
            position: self.player.position(),
        });
    }

    /// Jump if standing on the ground, scheduling the landing.
    pub fn jump(&mut self) -> bool {
        if !self.player.jump() {
            return false;
        }
        let delay = SimTick::ticks_for_millis(self.player_config.jump_duration_ms);
        self.scheduler.schedule_after(delay, SessionTimer::Land);
        self.events.push(SessionEvent::Jumped {
            height: self.player.position().y,
        });
        true
    }

    pub fn toggle_controls(&mut self) {
        self.controls_visible = !self.controls_visible;
        self.events.push(SessionEvent::ControlsToggled {
            visible: self.controls_visible,
        });
    }

    pub fn select_slot(&mut self, slot: HotbarSlot) {
        self.dispatch(StoreAction::SetSelectedSlot(slot));
    }

    /// Hit the block at `pos`; a broken block lands in the inventory.
    pub fn mine(&mut self, pos: BlockPos) -> MineOutcome {
        let outcome = self.world.mine(pos);
        match outcome {
            MineOutcome::Damaged { remaining } => {
                self.events
                    .push(SessionEvent::BlockDamaged { pos, remaining });
            }
            MineOutcome::Broken(material) => {
                self.events.push(SessionEvent::BlockMined { pos, material });
                self.dispatch(StoreAction::AddToInventory(NewItem::block(material)));
            }
            MineOutcome::Missing => debug!(%pos, "Nothing to mine"),
        }
        outcome
    }

    /// Place one unit of the selected stack against `target`'s `face`.
    pub fn place(&mut self, target: BlockPos, face: BlockFace) -> Result<BlockPos, PlacementError> {
        let (id, material, color) = {
            let store = self.store.read();
            let item = store
                .state()
                .selected_item()
                .ok_or(PlacementError::EmptySlot)?;
            if !item.is_placeable() {
                return Err(PlacementError::NotPlaceable(item.name.clone()));
            }
            (item.id, item.material, item.color.clone())
        };

        let pos = self
            .world
            .place(target, face, material, color.as_deref())?;
        if let Some(block) = self.world.blocks().get(pos) {
            self.events.push(SessionEvent::BlockPlaced {
                pos,
                material: block.material,
            });
        }
        self.consume(id);
        Ok(pos)
    }

    fn consume(&mut self, id: ItemId) {
        self.dispatch(StoreAction::RemoveFromInventory { id, amount: 1 });
    }

    /// Advance one simulation tick: fire due timers, then let mobs wander.
    pub fn tick(&mut self) {
        for timer in self.scheduler.advance() {
            match timer {
                SessionTimer::Land => {
                    self.player.land();
                    self.events.push(SessionEvent::Landed);
                }
                SessionTimer::SyncPosition => self.player.sync_display(),
            }
        }
        self.world.tick();
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.scheduler.clear();
        if cancelled > 0 {
            debug!(cancelled, "Session timers cancelled");
        }
        cancelled
    }
}

impl CommandContext for GameSession {
    fn press_key(&mut self, key: &str) -> Option<Action> {
        self.handle_key(key)
    }

    fn mine_block(&mut self, pos: BlockPos) -> MineOutcome {
        self.mine(pos)
    }

    fn place_block(&mut self, target: BlockPos, face: BlockFace) -> anyhow::Result<BlockPos> {
        Ok(self.place(target, face)?)
    }

    fn apply(&mut self, action: StoreAction) {
        self.dispatch(action);
    }

    fn toggle_controls(&mut self) -> bool {
        GameSession::toggle_controls(self);
        self.controls_visible()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
