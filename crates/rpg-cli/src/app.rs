//! Game driver - menus, battles and the save screen
//!
//! Every menu is a loop that re-asks on bad input. Running out of input
//! anywhere ends the session cleanly.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use strum::IntoEnumIterator;

use rpg_core::combat::{Battle, BattleOutcome, PlayerAction};
use rpg_core::navigation::{list_reachable_areas, list_reachable_zones};
use rpg_core::player::{Character, ClassKind, Stat};
use rpg_core::world::{GameOptions, World};
use rpg_core::{AreaEntry, GameError, GameRng, GameState};
use rpg_data::default_world;
use rpg_save::{SaveError, delete_slot, list_slots, load_slot, save_slot, slot_exists, SLOT_COUNT};

use crate::console::Console;
use crate::input::{parse_choice, parse_class, parse_direction, parse_stat, parse_yes_no};
use crate::map::map_lines;

/// Where control goes after a screen returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Stay on the current screen
    Continue,
    /// Drop the current game and go back to the main menu
    MainMenu,
    /// Leave the program
    Quit,
}

/// A game in progress: the generated world and the mutable state
#[derive(Debug)]
pub struct Session {
    pub world: World,
    pub state: GameState,
}

impl Session {
    /// Generate a world from the options and place a new character in it
    pub fn new_game(player: Character, options: &GameOptions) -> Result<Self, GameError> {
        let seed = options.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
        let world = default_world(options.grid_width, options.grid_height, &mut GameRng::new(seed))?;
        let state = GameState::new(player, &world, GameRng::new(seed))?
            .with_flee_chance(options.flee_chance);
        Ok(Self { world, state })
    }

    /// Rebuild the world a saved game was played in
    pub fn restore(state: GameState) -> Result<Self, GameError> {
        let (width, height) = state.world_size;
        let world = default_world(width, height, &mut GameRng::new(state.rng.seed()))?;
        let position = state.position;
        world.area(position.area)?;
        if position.area.zone != position.zone {
            return Err(GameError::InvalidMove {
                reason: format!(
                    "area {} does not belong to zone {}",
                    position.area, position.zone
                ),
            });
        }
        Ok(Self { world, state })
    }
}

/// Save screen outcome
enum SaveScreen {
    Back,
    Loaded(Box<GameState>),
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum SaveAction {
    Export,
    Import,
    Delete,
    Back,
}

#[derive(Debug, Clone, Copy)]
enum GameAction {
    MoveZone,
    MoveArea,
    Stats,
    Upgrade,
    Map,
    SaveMenu,
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum BattleChoice {
    Attack,
    Magic,
    Run,
    Forfeit,
}

pub struct App<R, W> {
    console: Console<R, W>,
    options: GameOptions,
    save_dir: PathBuf,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(console: Console<R, W>, options: GameOptions, save_dir: PathBuf) -> Self {
        Self {
            console,
            options,
            save_dir,
        }
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Numbered menu; returns the value of the picked item, `None` at EOF
    fn choose<T: Copy>(&mut self, header: &str, items: &[(String, T)]) -> Result<Option<T>> {
        self.choose_by(header, items, |_| None)
    }

    /// Like [`Self::choose`], but `by_name` may also accept a typed word
    fn choose_by<T: Copy>(
        &mut self,
        header: &str,
        items: &[(String, T)],
        by_name: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            self.console.title(header)?;
            for (i, (label, _)) in items.iter().enumerate() {
                self.console.say(&format!("{}. {}", i + 1, label))?;
            }
            let Some(line) = self.console.prompt("")? else {
                return Ok(None);
            };
            let picked = parse_choice(&line, items.len())
                .map(|n| items[n - 1].1)
                .or_else(|| by_name(&line));
            match picked {
                Some(value) => return Ok(Some(value)),
                None => self.console.bad("Invalid choice.")?,
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        loop {
            let Some(line) = self.console.prompt(&format!("{question} (y/n)"))? else {
                return Ok(None);
            };
            match parse_yes_no(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => self.console.bad("Please answer y or n.")?,
            }
        }
    }

    fn show_messages(&mut self, state: &mut GameState) -> Result<()> {
        for msg in state.drain_messages() {
            self.console.say(&msg)?;
        }
        Ok(())
    }

    /// Main menu loop
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.console.clear()?;
            self.console.title("Welcome To Melon Man's Text RPG!")?;
            let items = [
                ("Start a new game".to_string(), 1),
                ("Load or manage saved games".to_string(), 2),
                ("View credits".to_string(), 3),
                ("Exit".to_string(), 4),
            ];
            let Some(choice) = self.choose("What would you like to do?", &items)? else {
                return Ok(());
            };

            let flow = match choice {
                1 => self.start_new_game()?,
                2 => match self.save_screen(None)? {
                    SaveScreen::Loaded(state) => self.resume(*state)?,
                    SaveScreen::Back => Flow::Continue,
                    SaveScreen::Quit => Flow::Quit,
                },
                3 => self.credits()?,
                _ => Flow::Quit,
            };

            if flow == Flow::Quit {
                self.console.say("Goodbye!")?;
                return Ok(());
            }
        }
    }

    fn start_new_game(&mut self) -> Result<Flow> {
        let Some(player) = self.create_character()? else {
            return Ok(Flow::Quit);
        };
        let mut session = Session::new_game(player, &self.options)?;
        session.state.message(format!(
            "Welcome, {} the {}!",
            session.state.player.name,
            session.state.player.class()
        ));
        self.play(&mut session)
    }

    fn resume(&mut self, state: GameState) -> Result<Flow> {
        match Session::restore(state) {
            Ok(mut session) => {
                self.console.good(&format!("Loaded {}.", session.state.player.name))?;
                self.play(&mut session)
            }
            Err(e) => {
                self.console.bad(&format!("That save does not fit its world: {e}"))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn create_character(&mut self) -> Result<Option<Character>> {
        let mut name = self.options.name.trim().to_string();
        while name.is_empty() {
            let Some(line) = self.console.prompt("What is your name?")? else {
                return Ok(None);
            };
            name = line;
        }

        let class = match self.options.class {
            Some(class) => class,
            None => {
                let items: Vec<(String, ClassKind)> = ClassKind::iter()
                    .map(|c| {
                        let p = c.preset();
                        (
                            format!(
                                "{c} (Health: {}, Attack: {}, Defense: {}, Magic: {})",
                                p.health, p.attack, p.defense, p.magic
                            ),
                            c,
                        )
                    })
                    .collect();
                match self.choose_by("Choose your class:", &items, parse_class)? {
                    Some(class) => class,
                    None => return Ok(None),
                }
            }
        };

        tracing::debug!(%name, %class, "character created");
        Ok(Some(Character::new(name, class)))
    }

    fn describe_location(&mut self, session: &Session) -> Result<()> {
        let zone = session.world.zone(session.state.position.zone)?;
        let area = session.state.current_area(&session.world)?;
        self.console.title(&format!("Zone {}", zone.id))?;
        self.console.say(&zone.describe())?;
        self.console.say(&format!("You are in {}", area.describe()))?;
        if self.options.map {
            self.show_map(session)?;
        }
        Ok(())
    }

    fn show_map(&mut self, session: &Session) -> Result<()> {
        let lines = map_lines(
            session.world.width(),
            session.world.height(),
            session.state.position.zone,
        );
        let color = self.console.theme().map_zone;
        for line in lines {
            self.console.say_in(color, &line)?;
        }
        Ok(())
    }

    /// In-game menu loop
    pub fn play(&mut self, session: &mut Session) -> Result<Flow> {
        self.show_messages(&mut session.state)?;
        self.describe_location(session)?;

        loop {
            let items = [
                ("Move to another zone".to_string(), GameAction::MoveZone),
                ("Move to another area".to_string(), GameAction::MoveArea),
                ("View stats".to_string(), GameAction::Stats),
                ("Upgrade stats".to_string(), GameAction::Upgrade),
                ("View map".to_string(), GameAction::Map),
                ("Save menu".to_string(), GameAction::SaveMenu),
                ("Exit to main menu".to_string(), GameAction::Exit),
            ];
            let Some(action) = self.choose("What would you like to do?", &items)? else {
                return Ok(Flow::Quit);
            };

            let flow = match action {
                GameAction::MoveZone => self.move_zone(session)?,
                GameAction::MoveArea => self.move_area(session)?,
                GameAction::Stats => {
                    self.show_stats(&session.state)?;
                    Flow::Continue
                }
                GameAction::Upgrade => self.upgrade_stats(&mut session.state)?,
                GameAction::Map => {
                    if self.options.map {
                        self.show_map(session)?;
                    } else {
                        self.console.hint("The map is turned off.")?;
                    }
                    Flow::Continue
                }
                GameAction::SaveMenu => match self.save_screen(Some(&session.state))? {
                    SaveScreen::Back => Flow::Continue,
                    SaveScreen::Quit => Flow::Quit,
                    SaveScreen::Loaded(state) => match Session::restore(*state) {
                        Ok(loaded) => {
                            *session = loaded;
                            self.console
                                .good(&format!("Loaded {}.", session.state.player.name))?;
                            self.describe_location(session)?;
                            Flow::Continue
                        }
                        Err(e) => {
                            self.console.bad(&format!("That save does not fit its world: {e}"))?;
                            Flow::Continue
                        }
                    },
                },
                GameAction::Exit => self.exit_game(&session.state)?,
            };

            if flow != Flow::Continue {
                return Ok(flow);
            }
        }
    }

    fn exit_game(&mut self, state: &GameState) -> Result<Flow> {
        match self.confirm("Would you like to save before leaving?")? {
            None => Ok(Flow::Quit),
            Some(false) => Ok(Flow::MainMenu),
            Some(true) => match self.export(state)? {
                None => Ok(Flow::Quit),
                Some(true) => Ok(Flow::MainMenu),
                // Nothing was written; keep the game going
                Some(false) => Ok(Flow::Continue),
            },
        }
    }

    /// Handle what happened on arrival: narrate, then fight if needed
    fn arrive(&mut self, session: &mut Session, entry: AreaEntry) -> Result<Flow> {
        self.show_messages(&mut session.state)?;
        match entry {
            AreaEntry::Quiet => {
                if self.options.map {
                    self.show_map(session)?;
                }
                Ok(Flow::Continue)
            }
            AreaEntry::Encounter(battle) => self.battle(session, battle),
        }
    }

    fn move_zone(&mut self, session: &mut Session) -> Result<Flow> {
        let reachable = list_reachable_zones(&session.world, &session.state.position)?;
        let mut items: Vec<(String, Option<_>)> = reachable
            .iter()
            .map(|r| (format!("{} ({})", r.direction, r.zone.id), Some(r.direction)))
            .collect();
        items.push(("Back".to_string(), None));

        let by_name = |line: &str| {
            parse_direction(line)
                .filter(|d| reachable.iter().any(|r| r.direction == *d))
                .map(Some)
        };
        let Some(choice) = self.choose_by("Where would you like to go?", &items, by_name)? else {
            return Ok(Flow::Quit);
        };
        let Some(direction) = choice else {
            return Ok(Flow::Continue);
        };

        match session.state.move_direction(&session.world, direction) {
            Ok(entry) => self.arrive(session, entry),
            Err(e) if e.is_recoverable() => {
                self.console.bad(&e.to_string())?;
                Ok(Flow::Continue)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn move_area(&mut self, session: &mut Session) -> Result<Flow> {
        let areas = list_reachable_areas(&session.world, &session.state.position)?;
        if areas.is_empty() {
            let err = GameError::NoOtherAreas {
                zone: session.state.position.zone.to_string(),
            };
            self.console.bad(&err.to_string())?;
            return Ok(Flow::Continue);
        }

        let mut items: Vec<(String, Option<_>)> = areas
            .iter()
            .map(|a| (a.describe(), Some(a.id)))
            .collect();
        items.push(("Back".to_string(), None));

        let Some(choice) = self.choose("Which area would you like to visit?", &items)? else {
            return Ok(Flow::Quit);
        };
        let Some(target) = choice else {
            return Ok(Flow::Continue);
        };

        match session.state.move_area(&session.world, target) {
            Ok(entry) => self.arrive(session, entry),
            Err(e) if e.is_recoverable() => {
                self.console.bad(&e.to_string())?;
                Ok(Flow::Continue)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn show_stats(&mut self, state: &GameState) -> Result<()> {
        let player = &state.player;
        self.console.title("Your stats:")?;
        self.console.say(&player.describe())?;
        self.console.say(&format!(
            "Experience to next level: {}",
            player.exp_to_next_level()
        ))?;
        self.console.say("Moves:")?;
        for (i, m) in player.moves.iter().enumerate() {
            self.console.say(&format!("  {}. {}", i + 1, m.describe()))?;
        }
        Ok(())
    }

    fn upgrade_stats(&mut self, state: &mut GameState) -> Result<Flow> {
        loop {
            if state.player.points == 0 {
                self.console.bad(&GameError::NoPointsRemaining.to_string())?;
                return Ok(Flow::Continue);
            }

            let mut items: Vec<(String, Option<Stat>)> = Stat::iter()
                .map(|s| {
                    (
                        format!("{s} ({}, +{})", state.player.stat(s), s.increment()),
                        Some(s),
                    )
                })
                .collect();
            items.push(("Back".to_string(), None));

            let header = format!(
                "You have {} point(s). Which stat would you like to upgrade?",
                state.player.points
            );
            let by_name = |line: &str| parse_stat(line).map(Some);
            let Some(choice) = self.choose_by(&header, &items, by_name)? else {
                return Ok(Flow::Quit);
            };
            let Some(stat) = choice else {
                return Ok(Flow::Continue);
            };

            if let Err(e) = state.upgrade_stat(stat) {
                self.console.bad(&e.to_string())?;
            }
            self.show_messages(state)?;
        }
    }

    /// Battle loop; returns once the battle has an outcome
    pub fn battle(&mut self, session: &mut Session, mut battle: Battle) -> Result<Flow> {
        session.state.start_battle(&mut battle)?;
        self.show_messages(&mut session.state)?;

        loop {
            if let Some(outcome) = battle.outcome() {
                return self.finish_battle(outcome);
            }

            let player = &session.state.player;
            self.console.hint(&format!(
                "{}: {}/{} health | {}: {} health",
                player.name,
                player.health.max(0),
                player.max_health,
                battle.enemy().name,
                battle.enemy().health.max(0)
            ))?;

            let items = [
                ("Attack".to_string(), BattleChoice::Attack),
                ("Use magic".to_string(), BattleChoice::Magic),
                ("Run".to_string(), BattleChoice::Run),
                ("Forfeit".to_string(), BattleChoice::Forfeit),
            ];
            let Some(choice) = self.choose("What will you do?", &items)? else {
                return Ok(Flow::Quit);
            };

            let action = match choice {
                BattleChoice::Attack => {
                    let mut moves: Vec<(String, Option<usize>)> = session
                        .state
                        .player
                        .moves
                        .iter()
                        .enumerate()
                        .map(|(i, m)| (m.describe(), Some(i + 1)))
                        .collect();
                    moves.push(("Back".to_string(), None));
                    match self.choose("Choose a move:", &moves)? {
                        None => return Ok(Flow::Quit),
                        Some(None) => continue,
                        Some(Some(move_index)) => PlayerAction::Attack { move_index },
                    }
                }
                BattleChoice::Magic => PlayerAction::UseMagic,
                BattleChoice::Run => PlayerAction::Run,
                BattleChoice::Forfeit => match self.confirm("Forfeit the battle and quit the game?")? {
                    None => return Ok(Flow::Quit),
                    Some(false) => continue,
                    Some(true) => PlayerAction::Forfeit,
                },
            };

            match session.state.fight(&mut battle, action) {
                Ok(_) => self.show_messages(&mut session.state)?,
                Err(e) if e.is_recoverable() => self.console.bad(&e.to_string())?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) -> Result<Flow> {
        match outcome {
            BattleOutcome::Victory => {
                self.console.good("Victory!")?;
                Ok(Flow::Continue)
            }
            BattleOutcome::Fled => Ok(Flow::Continue),
            BattleOutcome::Defeat => {
                self.console.bad("Game over. Returning to the main menu.")?;
                Ok(Flow::MainMenu)
            }
            BattleOutcome::Forfeited => Ok(Flow::Quit),
        }
    }

    fn list_save_slots(&mut self) -> Result<()> {
        self.console.title("Save slots:")?;
        for (slot, header) in list_slots(&self.save_dir) {
            let text = match header {
                Some(h) => format!("Slot {slot}: {}", h.summary()),
                None => format!("Slot {slot}: empty"),
            };
            self.console.say(&text)?;
        }
        Ok(())
    }

    /// Pick a slot number; `Some(None)` means back
    fn pick_slot(&mut self, header: &str) -> Result<Option<Option<u8>>> {
        let mut items: Vec<(String, Option<u8>)> = (1..=SLOT_COUNT)
            .map(|s| (format!("Slot {s}"), Some(s)))
            .collect();
        items.push(("Back".to_string(), None));
        self.choose(header, &items)
    }

    /// Write `state` to a slot, asking before overwriting.
    /// Returns `None` at EOF, otherwise whether it saved.
    fn export(&mut self, state: &GameState) -> Result<Option<bool>> {
        let Some(choice) = self.pick_slot("Which slot would you like to save to?")? else {
            return Ok(None);
        };
        let Some(slot) = choice else {
            return Ok(Some(false));
        };

        if slot_exists(&self.save_dir, slot)? {
            match self.confirm(&format!("Slot {slot} already has a save. Overwrite it?"))? {
                None => return Ok(None),
                Some(false) => return Ok(Some(false)),
                Some(true) => {}
            }
        }

        match save_slot(&self.save_dir, slot, state) {
            Ok(()) => {
                self.console.good(&format!("Game saved to slot {slot}."))?;
                Ok(Some(true))
            }
            Err(e) => {
                self.console.bad(&format!("Could not save: {e}"))?;
                Ok(Some(false))
            }
        }
    }

    fn save_screen(&mut self, current: Option<&GameState>) -> Result<SaveScreen> {
        loop {
            self.list_save_slots()?;

            let mut items = Vec::new();
            if current.is_some() {
                items.push(("Save (export) the current game".to_string(), SaveAction::Export));
            }
            items.push(("Load (import) a saved game".to_string(), SaveAction::Import));
            items.push(("Delete a saved game".to_string(), SaveAction::Delete));
            items.push(("Back".to_string(), SaveAction::Back));

            let Some(action) = self.choose("Save menu:", &items)? else {
                return Ok(SaveScreen::Quit);
            };

            match action {
                SaveAction::Export => {
                    let Some(state) = current else { continue };
                    if self.export(state)?.is_none() {
                        return Ok(SaveScreen::Quit);
                    }
                }
                SaveAction::Import => {
                    let Some(choice) = self.pick_slot("Which slot would you like to load?")? else {
                        return Ok(SaveScreen::Quit);
                    };
                    let Some(slot) = choice else { continue };
                    match load_slot(&self.save_dir, slot) {
                        Ok(state) => return Ok(SaveScreen::Loaded(Box::new(state))),
                        Err(SaveError::NotFound) => {
                            self.console.bad(&format!("Slot {slot} is empty."))?;
                        }
                        Err(e) => self.console.bad(&format!("Could not load slot {slot}: {e}"))?,
                    }
                }
                SaveAction::Delete => {
                    let Some(choice) = self.pick_slot("Which slot would you like to delete?")? else {
                        return Ok(SaveScreen::Quit);
                    };
                    let Some(slot) = choice else { continue };
                    if !slot_exists(&self.save_dir, slot)? {
                        self.console.bad(&format!("Slot {slot} is empty."))?;
                        continue;
                    }
                    match self.confirm(&format!("Really delete slot {slot}?"))? {
                        None => return Ok(SaveScreen::Quit),
                        Some(false) => {}
                        Some(true) => match delete_slot(&self.save_dir, slot) {
                            Ok(()) => self.console.good(&format!("Slot {slot} deleted."))?,
                            Err(e) => self.console.bad(&format!("Could not delete slot {slot}: {e}"))?,
                        },
                    }
                }
                SaveAction::Back => return Ok(SaveScreen::Back),
            }
        }
    }

    fn credits(&mut self) -> Result<Flow> {
        self.console.title("           Credits:")?;
        self.console.say("    Created by: Melon Man")?;
        self.console.say("    Designed by: Melon Man")?;
        self.console.say("   Illustrated by: Melon Man")?;
        self.console.blank()?;
        match self.console.prompt("Press enter to return.")? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Quit),
        }
    }
}
