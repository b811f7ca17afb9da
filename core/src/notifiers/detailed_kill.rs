//! Per-kill damage breakdown.
//!
//! Damage accumulates per target from the first hit until that exact
//! target's death flushes one DETAILED_KILL event. Special attacks are
//! inferred, not signalled: a drop of the special-energy counter opens a
//! short window, and every hit landed inside it is attributed as a special
//! to the weapon equipped when the window opened.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::{Notifier, NotifierContext, payload};
use crate::client::ClientSignal;
use crate::events::{EventKind, NotificationEvent};
use crate::game_ids::{COUNTER_SPECIAL_ENERGY, SPECIAL_WINDOW_TICKS};

/// Fallback weapon label when the host reports nothing equipped.
const UNARMED: &str = "Unarmed";

/// Running totals for one in-progress target.
#[derive(Debug, Default, Clone)]
struct KillAccumulator {
    total_damage: u64,
    hit_count: u32,
    special_count: u32,
    last_hit_weapon: Option<String>,
    last_hit_damage: u32,
    weapon_damage: HashMap<String, u64>,
}

impl KillAccumulator {
    fn record(&mut self, weapon: String, amount: u32, special: bool) {
        self.total_damage += u64::from(amount);
        self.hit_count += 1;
        if special {
            self.special_count += 1;
        }
        self.last_hit_damage = amount;
        *self.weapon_damage.entry(weapon.clone()).or_insert(0) += u64::from(amount);
        self.last_hit_weapon = Some(weapon);
    }
}

#[derive(Debug, Default)]
pub struct DetailedKillNotifier {
    /// Keyed by stable target id; entries die with their target or on reset.
    accumulators: HashMap<u64, KillAccumulator>,
    last_special_energy: Option<i32>,
    /// Last tick, inclusive, on which hits still count as specials.
    special_until: Option<u64>,
    /// Weapon equipped when the window opened.
    special_weapon: Option<String>,
}

impl DetailedKillNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_open(&self, tick: u64) -> bool {
        self.special_until.is_some_and(|until| tick <= until)
    }
}

impl Notifier for DetailedKillNotifier {
    fn kind(&self) -> EventKind {
        EventKind::DetailedKill
    }

    fn handle_signal(
        &mut self,
        signal: &ClientSignal,
        ctx: &NotifierContext<'_>,
    ) -> Option<NotificationEvent> {
        match signal {
            ClientSignal::CounterChanged { id, value } if *id == COUNTER_SPECIAL_ENERGY => {
                // Only a decrease means a special was fired; regeneration
                // ticks the counter up.
                if self.last_special_energy.is_some_and(|prev| *value < prev) {
                    self.special_until = Some(ctx.tick + SPECIAL_WINDOW_TICKS - 1);
                    self.special_weapon = ctx.view.equipped_weapon();
                }
                self.last_special_energy = Some(*value);
                None
            }
            ClientSignal::CombatHit { target, amount, mine } => {
                if !mine {
                    return None;
                }
                let special = self.window_open(ctx.tick);
                let weapon = if special {
                    self.special_weapon.clone()
                } else {
                    ctx.view.equipped_weapon()
                }
                .unwrap_or_else(|| UNARMED.to_string());
                self.accumulators.entry(target.id).or_default().record(weapon, *amount, special);
                None
            }
            ClientSignal::ActorDeath { target, local_player } => {
                if *local_player {
                    return None;
                }
                let acc = self.accumulators.remove(&target.id)?;
                if !ctx.filters.target_passes(&target.name) {
                    return None;
                }
                let weapon_damage: Map<String, Value> =
                    acc.weapon_damage.into_iter().map(|(w, d)| (w, d.into())).collect();
                Some(NotificationEvent::new(
                    EventKind::DetailedKill,
                    payload(json!({
                        "target": target.name,
                        "totalDamage": acc.total_damage,
                        "hitCount": acc.hit_count,
                        "specialCount": acc.special_count,
                        "lastHitWeapon": acc.last_hit_weapon.unwrap_or_else(|| UNARMED.to_string()),
                        "lastHitDamage": acc.last_hit_damage,
                        "weaponDamage": weapon_damage,
                    })),
                ))
            }
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.accumulators.clear();
        self.last_special_energy = None;
        self.special_until = None;
        self.special_weapon = None;
    }
}
