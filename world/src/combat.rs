//! Collision outcomes: bullet hits, contact damage, and miss resolution.

use wave_survivor_core::{BulletId, EndCause, EnemyId, Event, Health, MissReason};

use crate::{
    ledger::Charge,
    schedule::Deferred,
    World,
};

/// Resolves every active bullet that touches an enemy this frame.
///
/// Bullets are visited in id order and each strikes at most one enemy, the
/// lowest-id one it overlaps. Enemies killed by an earlier bullet are already
/// gone when later bullets are checked.
pub(crate) fn resolve_bullet_hits(world: &mut World, out_events: &mut Vec<Event>) {
    let bullet_ids: Vec<BulletId> = world.bullets.keys().copied().collect();
    for bullet_id in bullet_ids {
        let Some(bullet_body) = world.bullets.get(&bullet_id).map(|bullet| bullet.body) else {
            continue;
        };

        let struck = world
            .enemies
            .iter()
            .find(|(_, enemy)| world.physics.overlaps(bullet_body, enemy.body))
            .map(|(id, _)| *id);

        if let Some(enemy_id) = struck {
            apply_hit(world, bullet_id, enemy_id, out_events);
        }
    }
}

fn apply_hit(world: &mut World, bullet_id: BulletId, enemy_id: EnemyId, out_events: &mut Vec<Event>) {
    let Some(bullet) = world.bullets.remove(&bullet_id) else {
        return;
    };
    world.physics.remove(bullet.body);
    out_events.push(Event::BulletHit {
        bullet: bullet_id,
        enemy: enemy_id,
    });

    let damage = world.damage.get();
    if let Some(enemy) = world.enemies.get_mut(&enemy_id) {
        let before = enemy.health;
        enemy.health = before.saturating_sub(damage);
        log::debug!(
            "enemy {} hit by bullet {}: health {} -> {}",
            enemy_id.get(),
            bullet_id.get(),
            before.get(),
            enemy.health.get()
        );

        if enemy.health.is_depleted() {
            if let Some(dead) = world.enemies.remove(&enemy_id) {
                world.physics.remove(dead.body);
            }
            world.enemies_killed = world.enemies_killed.saturating_add(1);
            out_events.push(Event::EnemyKilled { enemy: enemy_id });
        } else {
            out_events.push(Event::EnemyDamaged {
                enemy: enemy_id,
                health: enemy.health,
            });
        }
    }

    charge_ledger(world, Charge::Hit, out_events);
}

/// Applies contact damage when the player touches any enemy outside an
/// invulnerability window. Enemies are never harmed by contact.
pub(crate) fn resolve_player_contact(world: &mut World, out_events: &mut Vec<Event>) {
    if world.player.invulnerable || !world.player.enabled {
        return;
    }

    let player_body = world.player.body;
    let touching = world
        .enemies
        .values()
        .any(|enemy| world.physics.overlaps(player_body, enemy.body));
    if !touching {
        return;
    }

    world.player.health = world.player.health.saturating_sub(1);
    world.player.invulnerable = true;
    let due = world.elapsed.saturating_add(world.config.invulnerability());
    world.schedule.schedule(due, Deferred::InvulnerabilityExpired);
    log::debug!("player hit, health now {}", world.player.health.get());
    out_events.push(Event::PlayerDamaged {
        health: world.player.health,
    });

    if world.player.health == Health::ZERO {
        crate::end_session(world, EndCause::PlayerDefeated, out_events);
    }
}

/// Flags active bullets that left the map expanded by the miss margin.
pub(crate) fn resolve_boundary_misses(world: &mut World, out_events: &mut Vec<Event>) {
    let map = world.config.map();
    let margin = world.config.miss_margin;
    let escaped: Vec<BulletId> = world
        .bullets
        .iter()
        .filter(|(_, bullet)| {
            world
                .physics
                .position(bullet.body)
                .map_or(true, |position| !map.contains_expanded(position, margin))
        })
        .map(|(id, _)| *id)
        .collect();

    for bullet_id in escaped {
        resolve_miss(world, bullet_id, MissReason::LeftBounds, out_events);
    }
}

/// Resolves a bullet as a miss if it is still active.
///
/// A bullet that already hit or missed is absent from the registry, so a late
/// timeout or a second boundary check is a no-op.
pub(crate) fn resolve_miss(
    world: &mut World,
    bullet_id: BulletId,
    reason: MissReason,
    out_events: &mut Vec<Event>,
) {
    let Some(bullet) = world.bullets.remove(&bullet_id) else {
        return;
    };
    world.physics.remove(bullet.body);
    log::debug!("bullet {} missed ({reason:?})", bullet_id.get());
    out_events.push(Event::BulletMissed {
        bullet: bullet_id,
        reason,
    });

    charge_ledger(world, Charge::Miss, out_events);
}

fn charge_ledger(world: &mut World, charge: Charge, out_events: &mut Vec<Event>) {
    let depleted = world.ledger.charge(charge);
    out_events.push(Event::AmmoChanged {
        remaining: world.ledger.remaining(),
    });

    if depleted {
        let due = world.elapsed.saturating_add(world.config.end_game_delay());
        world
            .schedule
            .schedule(due, Deferred::EndSession(EndCause::AmmoExhausted));
    }
}
