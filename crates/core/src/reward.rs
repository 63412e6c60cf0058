use crate::{
    resolve_description, resolve_stats, AssignmentResult, BuildError, Caster, Event, EventBus,
    GamePhase, RewardConfig, RngState, SlotAssigner, Spell, SpellBuilder, SpellCatalog,
    SpellStats, WaveSummary,
};
use thiserror::Error;
use tracing::{debug, warn};

pub const REWARD_TITLE: &str = "You Survived!";

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("caster unavailable")]
    CasterUnavailable,
    #[error("no reward is on offer")]
    NoOffer,
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Everything the presentation layer needs for one reward screen.
#[derive(Debug, Clone)]
pub struct RewardOffer {
    pub generation: u64,
    pub title: &'static str,
    pub summary: WaveSummary,
    pub spell: Spell,
    pub description: Vec<String>,
    pub stats: SpellStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardDecision {
    Assigned(AssignmentResult),
    Skipped,
}

pub struct RewardContext<'a> {
    pub caster: Option<&'a Caster>,
    pub builder: &'a SpellBuilder<'a>,
    pub catalog: &'a SpellCatalog,
    pub rng: &'a mut RngState,
    pub events: &'a mut EventBus,
}

#[derive(Debug)]
enum Stage {
    Idle,
    Pending { remaining: f32, summary: WaveSummary },
    Showing(RewardOffer),
}

/// Wave-end reward screen. A new trigger always replaces whatever is pending
/// or visible; two offers never coexist.
#[derive(Debug)]
pub struct RewardFlow {
    delay: f32,
    generation: u64,
    last_phase: Option<GamePhase>,
    stage: Stage,
}

impl RewardFlow {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            generation: 0,
            last_phase: None,
            stage: Stage::Idle,
        }
    }

    pub fn from_config(config: &RewardConfig) -> Self {
        Self::new(config.presentation_delay)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.stage, Stage::Pending { .. })
    }

    pub fn offer(&self) -> Option<&RewardOffer> {
        match &self.stage {
            Stage::Showing(offer) => Some(offer),
            _ => None,
        }
    }

    /// Feed the current game phase. Only transitions matter: entering
    /// `WaveEnd` schedules a reward, entering anything else hides it.
    pub fn observe_phase(
        &mut self,
        phase: GamePhase,
        summary: WaveSummary,
        events: &mut EventBus,
    ) {
        if self.last_phase == Some(phase) {
            return;
        }
        self.last_phase = Some(phase);
        if phase == GamePhase::WaveEnd {
            self.schedule(summary, events);
        } else {
            self.hide(events);
        }
    }

    pub fn schedule(&mut self, summary: WaveSummary, events: &mut EventBus) -> u64 {
        if !matches!(self.stage, Stage::Idle) {
            debug!(generation = self.generation, "superseding reward");
            events.push(Event::RewardSuperseded {
                generation: self.generation,
            });
        }
        self.generation += 1;
        self.stage = Stage::Pending {
            remaining: self.delay,
            summary,
        };
        events.push(Event::RewardScheduled {
            generation: self.generation,
            completed_wave: summary.completed_wave,
        });
        self.generation
    }

    pub fn hide(&mut self, events: &mut EventBus) {
        if matches!(self.stage, Stage::Idle) {
            return;
        }
        self.stage = Stage::Idle;
        events.push(Event::RewardHidden);
    }

    /// Advance the presentation delay by `dt` seconds. Once it elapses the
    /// offer is built and stays visible until accepted, skipped or replaced.
    pub fn tick(
        &mut self,
        dt: f32,
        ctx: RewardContext<'_>,
    ) -> Result<Option<&RewardOffer>, RewardError> {
        let summary = match &mut self.stage {
            Stage::Pending { remaining, summary } => {
                *remaining -= dt.max(0.0);
                if *remaining > 0.0 {
                    return Ok(None);
                }
                *summary
            }
            _ => return Ok(self.offer()),
        };
        self.present(summary, ctx)
    }

    fn present(
        &mut self,
        summary: WaveSummary,
        ctx: RewardContext<'_>,
    ) -> Result<Option<&RewardOffer>, RewardError> {
        let generation = self.generation;
        let built = match ctx.caster {
            Some(caster) => ctx
                .builder
                .build(caster, ctx.rng)
                .map_err(RewardError::from),
            None => Err(RewardError::CasterUnavailable),
        };
        let spell = match built {
            Ok(spell) => spell,
            Err(err) => {
                warn!(generation, "reward aborted: {}", err);
                self.stage = Stage::Idle;
                ctx.events.push(Event::RewardAborted {
                    generation,
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };
        let description = resolve_description(&spell, ctx.catalog);
        let stats = resolve_stats(&spell);
        ctx.events.push(Event::RewardOffered {
            generation,
            spell: spell.display_name().to_string(),
            modifiers: spell.modifier_count(),
            damage: stats.damage,
            mana: stats.mana,
        });
        self.stage = Stage::Showing(RewardOffer {
            generation,
            title: REWARD_TITLE,
            summary,
            spell,
            description,
            stats,
        });
        Ok(self.offer())
    }

    /// Commit the visible offer. Every assignment outcome closes the screen
    /// and requests the next wave; a full inventory just discards the spell.
    pub fn accept(
        &mut self,
        caster: Option<&mut Caster>,
        events: &mut EventBus,
    ) -> Result<RewardDecision, RewardError> {
        if self.offer().is_none() {
            return Err(RewardError::NoOffer);
        }
        let Some(caster) = caster else {
            warn!("cannot accept reward: caster unavailable");
            return Err(RewardError::CasterUnavailable);
        };
        let offer = self.take_offer()?;
        let name = offer.spell.display_name().to_string();
        let result = SlotAssigner::accept(&mut caster.inventory, offer.spell);
        events.push(Event::from_assignment(name, result));
        request_next_wave(offer.summary, events);
        Ok(RewardDecision::Assigned(result))
    }

    pub fn skip(&mut self, events: &mut EventBus) -> Result<RewardDecision, RewardError> {
        let offer = self.take_offer()?;
        events.push(Event::RewardSkipped {
            spell: offer.spell.display_name().to_string(),
        });
        request_next_wave(offer.summary, events);
        Ok(RewardDecision::Skipped)
    }

    fn take_offer(&mut self) -> Result<RewardOffer, RewardError> {
        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Showing(offer) => Ok(offer),
            other => {
                self.stage = other;
                Err(RewardError::NoOffer)
            }
        }
    }
}

fn request_next_wave(summary: WaveSummary, events: &mut EventBus) {
    events.push(Event::NextWaveRequested {
        wave: summary.next_wave,
    });
}
