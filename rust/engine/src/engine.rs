use tracing::debug;

use crate::action::Action;
use crate::board::{Board, Cell};
use crate::config::RulesConfig;
use crate::effects::{self, EffectPolicy, EffectRequest, HexChoice, HexMode};
use crate::errors::GameError;
use crate::game::{GameState, MatchOutcome, PendingPlacement, Phase, Undo};
use crate::omen;
use crate::record::TurnRecord;
use crate::rules;
use crate::snapshot::Snapshot;
use crate::tiles::{Face, Flip, PlayerId, Tile};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

// Effect chain length is bounded: Eclipse cascades into at most one Ward/Hex.
const MAX_SETTLE_STEPS: usize = 4;

/// Action API over a [`GameState`].
///
/// Every action either succeeds or returns a [`GameError`] leaving the state
/// exactly as it was.
///
/// # Examples
///
/// ```
/// use nightdealer_engine::config::RulesConfig;
/// use nightdealer_engine::engine::Engine;
/// use nightdealer_engine::tiles::{Face, PlayerId};
///
/// let mut engine = Engine::with_starter(7, RulesConfig::default(), PlayerId::One).unwrap();
/// engine.set_faces(PlayerId::One, [Face::Atk; 5]);
///
/// engine.place(0, 4).unwrap();
/// engine.validate_turn().unwrap();
/// assert_eq!(engine.current_player(), PlayerId::Two);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    /// Clones used for look-ahead keep quiet
    simulated: bool,
}

impl Engine {
    pub fn new(seed: Option<u64>, config: RulesConfig) -> Result<Self, GameError> {
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Ok(Self::from_state(GameState::new(config, seed, None)?))
    }

    /// Like [`Engine::new`] with the first round's opening player fixed.
    pub fn with_starter(seed: u64, config: RulesConfig, starter: PlayerId) -> Result<Self, GameError> {
        Ok(Self::from_state(GameState::new(config, seed, Some(starter))?))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            simulated: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Scripted setups: direct board access.
    pub fn board_mut(&mut self) -> &mut Board {
        self.state.board_mut()
    }

    /// Scripted setups: overwrite `player`'s unspent wheel faces.
    pub fn set_faces(&mut self, player: PlayerId, faces: [Face; 5]) {
        self.state.set_unused_faces(player, faces);
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.can_reroll())
    }

    pub fn can_place(&self, cell: Cell) -> bool {
        !self.state.is_over()
            && self.state.effect().is_idle()
            && rules::can_place(&self.state, cell)
    }

    pub fn can_reroll(&self) -> bool {
        self.check_reroll().is_ok()
    }

    fn ensure_live(&self) -> Result<(), GameError> {
        if self.state.is_over() {
            Err(GameError::MatchOver)
        } else {
            Ok(())
        }
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        self.ensure_live()?;
        if self.state.effect().is_idle() {
            Ok(())
        } else {
            Err(GameError::EffectPending)
        }
    }

    fn ensure_effect(&self) -> Result<EffectRequest, GameError> {
        self.ensure_live()?;
        let effect = self.state.effect();
        if effect.is_idle() {
            return Err(GameError::WrongPhase {
                phase: self.state.phase(),
            });
        }
        Ok(effect.clone())
    }

    fn check_reroll(&self) -> Result<(), GameError> {
        self.ensure_idle()?;
        rules::check_reroll(&self.state)
    }

    pub fn select_wheel(&mut self, wheel: usize) -> Result<(), GameError> {
        self.ensure_idle()?;
        let p = self.state.current;
        if !self.state.loadouts[p.index()].is_available(wheel) {
            return Err(GameError::WheelUnavailable { wheel });
        }
        self.state.placement.selected = Some(wheel);
        Ok(())
    }

    /// Puts the selected wheel's face on `cell` and runs its placement effect.
    /// Returns the request the player now has to answer (or `Idle`).
    pub fn place_on_cell(&mut self, cell: Cell) -> Result<EffectRequest, GameError> {
        self.ensure_idle()?;
        let wheel = self
            .state
            .placement
            .selected
            .ok_or(GameError::NoWheelSelected)?;
        rules::check_placement(&self.state, cell)?;
        let p = self.state.current;
        let face = self.state.loadouts[p.index()]
            .face(wheel)
            .filter(|_| self.state.loadouts[p.index()].is_available(wheel))
            .ok_or(GameError::WheelUnavailable { wheel })?;

        let st = &mut self.state;
        let undo = Undo {
            board: st.board,
            traps: st.traps,
            eclipse_used: st.eclipse_used[p.index()],
        };
        if !st.board.place(cell, Tile::new(p, face)) {
            return Err(GameError::CellUnavailable { cell });
        }
        st.loadouts[p.index()].set_used(wheel, true);
        if face.is_eclipse() {
            st.eclipse_used[p.index()] = true;
        }
        let foreign_trap = st.traps[p.other().index()];
        let trapped = foreign_trap == Some(cell);
        // Covering your own trap disarms it
        if st.traps[p.index()] == Some(cell) {
            st.traps[p.index()] = None;
        }
        let effect = if trapped && !face.is_eclipse() {
            EffectRequest::Idle
        } else {
            effects::on_place(&mut st.board, cell).without_trap_target(foreign_trap)
        };
        st.placement.pending.push(PendingPlacement {
            wheel,
            cell,
            face,
            trapped,
            undo,
        });
        st.placement.effect = effect.clone();
        st.placement.selected = None;
        st.omen_window = false;
        if !self.simulated {
            debug!(player = %p, wheel, cell, face = %face, trapped, "tile placed");
        }
        Ok(effect)
    }

    /// Select + place. A rejected placement leaves the previous selection alone.
    pub fn place(&mut self, wheel: usize, cell: Cell) -> Result<EffectRequest, GameError> {
        let previous = self.state.placement.selected;
        self.select_wheel(wheel)?;
        self.place_on_cell(cell).inspect_err(|_| {
            self.state.placement.selected = previous;
        })
    }

    pub fn resolve_ward_target(&mut self, target: Cell) -> Result<(), GameError> {
        let request = self.ensure_effect()?;
        effects::resolve_ward(&mut self.state.board, &request, target)?;
        self.state.placement.effect = EffectRequest::Idle;
        Ok(())
    }

    pub fn resolve_hex_choice(&mut self, choice: HexChoice) -> Result<(), GameError> {
        let request = self.ensure_effect()?;
        let caster = self.state.current;
        let serial = self.state.turn_serial;
        let st = &mut self.state;
        effects::resolve_hex(&mut st.board, &mut st.traps, &request, choice, caster, serial)?;
        st.placement.effect = EffectRequest::Idle;
        Ok(())
    }

    /// Fixes the pending Eclipse's kind; the returned request is the cascade, if any.
    pub fn resolve_eclipse_affinity(&mut self, kind: Face) -> Result<EffectRequest, GameError> {
        let request = self.ensure_effect()?;
        let trapped = self
            .state
            .placement
            .pending
            .iter()
            .rev()
            .find(|p| Some(p.cell) == request.cell())
            .is_some_and(|p| p.trapped);
        let foreign_trap = self.state.traps[self.state.current.other().index()];
        let next = effects::resolve_eclipse(&mut self.state.board, &request, kind, trapped)?
            .without_trap_target(foreign_trap);
        self.state.placement.effect = next.clone();
        Ok(next)
    }

    /// Takes back the most recent pending placement along with every change it caused.
    pub fn cancel_last_placement(&mut self) -> Result<(), GameError> {
        self.ensure_live()?;
        let p = self.state.current;
        let st = &mut self.state;
        let last = st
            .placement
            .pending
            .pop()
            .ok_or(GameError::NothingToCancel)?;
        st.board = last.undo.board;
        st.traps = last.undo.traps;
        st.eclipse_used[p.index()] = last.undo.eclipse_used;
        st.loadouts[p.index()].set_used(last.wheel, false);
        st.placement.effect = EffectRequest::Idle;
        st.placement.selected = None;
        Ok(())
    }

    pub fn cancel_all_placements(&mut self) -> Result<(), GameError> {
        self.ensure_live()?;
        if self.state.placement.pending.is_empty() {
            return Err(GameError::NothingToCancel);
        }
        while !self.state.placement.pending.is_empty() {
            self.cancel_last_placement()?;
        }
        Ok(())
    }

    pub fn reroll(&mut self) -> Result<(), GameError> {
        self.check_reroll()?;
        let p = self.state.current.index();
        let st = &mut self.state;
        st.rerolls[p] -= 1;
        st.reroll_used_this_turn = true;
        let eclipse_allowed = !st.eclipse_used[p];
        st.roller.roll_faces(&mut st.loadouts[p], true, eclipse_allowed);
        st.placement.selected = None;
        st.omen_window = false;
        Ok(())
    }

    /// Resolves traps, RPS and curses for the turn and hands control on.
    pub fn validate_turn(&mut self) -> Result<TurnRecord, GameError> {
        self.ensure_idle()?;
        Ok(self.state.commit_turn())
    }

    /// Reverses the last-batch flip on `cell` and spends the round's Omen.
    pub fn apply_omen(&mut self, cell: Cell) -> Result<Flip, GameError> {
        self.ensure_live()?;
        if !self.state.omen_window {
            return Err(GameError::OmenUnavailable);
        }
        let st = &mut self.state;
        let flip = omen::reverse(&mut st.board, &mut st.last_flips, cell)?;
        let p = st.current.index();
        st.omen[p] = st.omen[p].saturating_sub(1);
        st.omen_window = false;
        st.omen_reversal = Some(flip);
        Ok(flip)
    }

    pub fn decline_omen(&mut self) -> Result<(), GameError> {
        self.ensure_live()?;
        if !self.state.omen_window {
            return Err(GameError::OmenUnavailable);
        }
        self.state.omen_window = false;
        Ok(())
    }

    /// Dispatches a serialized action.
    pub fn apply(&mut self, action: Action) -> Result<(), GameError> {
        let player = self.state.current;
        let result = match action {
            Action::SelectWheel { wheel } => self.select_wheel(wheel),
            Action::PlaceOnCell { cell } => self.place_on_cell(cell).map(drop),
            Action::Place { wheel, cell } => self.place(wheel, cell).map(drop),
            Action::ResolveWard { target } => self.resolve_ward_target(target),
            Action::ResolveHex { mode, cell } => self.resolve_hex_choice(match mode {
                HexMode::Curse => HexChoice::Curse(cell),
                HexMode::Trap => HexChoice::Trap(cell),
            }),
            Action::ResolveEclipse { kind } => self.resolve_eclipse_affinity(kind).map(drop),
            Action::CancelLast => self.cancel_last_placement(),
            Action::CancelAll => self.cancel_all_placements(),
            Action::Reroll => self.reroll(),
            Action::Validate => self.validate_turn().map(drop),
            Action::ApplyOmen { cell } => self.apply_omen(cell).map(drop),
            Action::DeclineOmen => self.decline_omen(),
        };
        if !self.simulated {
            match &result {
                Ok(()) => debug!(player = %player, ?action, "action applied"),
                Err(e) => debug!(player = %player, ?action, error = %e, "action rejected"),
            }
        }
        result
    }

    /// Like [`Engine::apply`], on behalf of `player`.
    pub fn act(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        self.ensure_live()?;
        let expected = self.state.current;
        if player != expected {
            return Err(GameError::NotYourTurn {
                expected,
                actual: player,
            });
        }
        self.apply(action)
    }

    fn simulation(&self) -> Engine {
        Engine {
            state: self.state.clone(),
            simulated: true,
        }
    }

    /// Answers outstanding requests with `policy` until the turn is idle.
    /// `affinity` is used for any Eclipse on the way.
    pub fn settle_effects(
        &mut self,
        policy: &dyn EffectPolicy,
        affinity: Option<Face>,
    ) -> Result<(), GameError> {
        for _ in 0..MAX_SETTLE_STEPS {
            match self.state.effect().clone() {
                EffectRequest::Idle => return Ok(()),
                EffectRequest::AwaitingEclipse { .. } => {
                    self.resolve_eclipse_affinity(affinity.unwrap_or(Face::Atk))?;
                }
                EffectRequest::AwaitingWard { cell, candidates } => {
                    let target = policy.ward_target(&self.state.board, cell, &candidates);
                    self.resolve_ward_target(target)?;
                }
                EffectRequest::AwaitingHex {
                    cell,
                    curse_targets,
                    trap_targets,
                } => {
                    let choice =
                        policy.hex_choice(&self.state.board, cell, &curse_targets, &trap_targets);
                    self.resolve_hex_choice(choice)?;
                }
            }
        }
        if self.state.effect().is_idle() {
            Ok(())
        } else {
            Err(GameError::EffectPending)
        }
    }

    /// Board after placing `wheel` on `cell`, settling effects with `policy`
    /// and running this turn's traps and RPS. `None` if the placement is illegal.
    /// The live state is never touched.
    pub fn simulate_placement(
        &self,
        wheel: usize,
        cell: Cell,
        affinity: Option<Face>,
        policy: &dyn EffectPolicy,
    ) -> Option<Board> {
        let mut sim = self.simulation();
        sim.place(wheel, cell).ok()?;
        sim.settle_effects(policy, affinity).ok()?;
        Some(sim.state.preview_board())
    }

    /// Board after resolving the pending Eclipse to `kind` and settling the rest.
    pub fn simulate_affinity(&self, kind: Face, policy: &dyn EffectPolicy) -> Option<Board> {
        if !matches!(self.state.effect(), EffectRequest::AwaitingEclipse { .. }) {
            return None;
        }
        let mut sim = self.simulation();
        sim.resolve_eclipse_affinity(kind).ok()?;
        sim.settle_effects(policy, Some(kind)).ok()?;
        Some(sim.state.preview_board())
    }

    /// Board the current pending tiles would produce if validated now.
    pub fn preview(&self) -> Board {
        self.state.preview_board()
    }
}
