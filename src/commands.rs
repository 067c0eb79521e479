use std::fmt;

use blockadventure_core::{
    GameMode, HotbarSlot, ItemId, ItemKind, Material, NewItem, PlayerCharacter, StoreAction,
    HOTBAR_SIZE,
};
use blockadventure_world::{BlockFace, BlockPos, MineOutcome};

use crate::input::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Help,
    Key { key: String },
    Mine { pos: BlockPos },
    Place { target: BlockPos, face: BlockFace },
    Slot { slot: HotbarSlot },
    Give { item: NewItem },
    Xp { amount: u32 },
    Health { delta: i32 },
    Energy { delta: i32 },
    Money { delta: i64 },
    Remove { id: ItemId, amount: u32 },
    Mode { mode: GameMode },
    Character { character: PlayerCharacter },
    Controls,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

pub trait CommandContext {
    /// Feed a key press through the input bindings.
    fn press_key(&mut self, key: &str) -> Option<Action>;

    fn mine_block(&mut self, pos: BlockPos) -> MineOutcome;
    fn place_block(&mut self, target: BlockPos, face: BlockFace) -> anyhow::Result<BlockPos>;

    /// Commit a store mutation.
    fn apply(&mut self, action: StoreAction);

    /// Flip the controls panel, returning the new visibility.
    fn toggle_controls(&mut self) -> bool;
}

pub fn execute_command(ctx: &mut impl CommandContext, cmd: GameCommand) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        GameCommand::Help => {
            out.lines.extend(help_lines());
        }
        GameCommand::Key { key } => match ctx.press_key(&key) {
            Some(action) => out.lines.push(format!("Key {key} -> {action:?}")),
            None => out.lines.push(format!("Key {key} is not bound")),
        },
        GameCommand::Mine { pos } => match ctx.mine_block(pos) {
            MineOutcome::Damaged { remaining } => out
                .lines
                .push(format!("Hit block at {pos} ({remaining} durability left)")),
            MineOutcome::Broken(material) => out.lines.push(format!(
                "Mined {} at {pos}",
                material.block_item_name()
            )),
            MineOutcome::Missing => out.lines.push(format!("Error: no block at {pos}")),
        },
        GameCommand::Place { target, face } => match ctx.place_block(target, face) {
            Ok(pos) => out.lines.push(format!("Placed block at {pos}")),
            Err(err) => out.lines.push(format!("Error: {err:#}")),
        },
        GameCommand::Slot { slot } => {
            ctx.apply(StoreAction::SetSelectedSlot(slot));
            out.lines.push(format!("Selected slot {}", slot.index() + 1));
        }
        GameCommand::Give { item } => {
            let line = format!("Gave {}× {}", item.quantity, item.name);
            ctx.apply(StoreAction::AddToInventory(item));
            out.lines.push(line);
        }
        GameCommand::Xp { amount } => {
            ctx.apply(StoreAction::AddExperience(amount));
            out.lines.push(format!("Added {amount} experience"));
        }
        GameCommand::Health { delta } => {
            ctx.apply(StoreAction::UpdateHealth(delta));
            out.lines.push(format!("Health changed by {delta:+}"));
        }
        GameCommand::Energy { delta } => {
            ctx.apply(StoreAction::UpdateEnergy(delta));
            out.lines.push(format!("Energy changed by {delta:+}"));
        }
        GameCommand::Money { delta } => {
            ctx.apply(StoreAction::UpdateCurrency(delta));
            out.lines.push(format!("Currency changed by {delta:+}"));
        }
        GameCommand::Remove { id, amount } => {
            ctx.apply(StoreAction::RemoveFromInventory { id, amount });
            out.lines.push(format!("Removed up to {amount} from stack {id}"));
        }
        GameCommand::Mode { mode } => {
            ctx.apply(StoreAction::SetGameMode(Some(mode)));
            out.lines.push(format!("Mode set to {}", mode.label()));
        }
        GameCommand::Character { character } => {
            ctx.apply(StoreAction::SetPlayerCharacter(character));
            out.lines
                .push(format!("Character set to {}", character.as_str()));
        }
        GameCommand::Controls => {
            let visible = ctx.toggle_controls();
            out.lines.push(format!(
                "Controls {}",
                if visible { "shown" } else { "hidden" }
            ));
        }
    }
    out
}

pub fn parse_command(input: &str) -> Result<GameCommand, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(GameCommand::Help);
    }

    let input = input.strip_prefix('/').unwrap_or(input).trim();
    if input.is_empty() {
        return Ok(GameCommand::Help);
    }

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| CommandError::new("Missing command"))?
        .to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "help" | "?" => Ok(GameCommand::Help),
        "key" | "press" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: /key <name>"));
            }
            Ok(GameCommand::Key {
                key: args[0].to_string(),
            })
        }
        "mine" => {
            if args.len() != 3 {
                return Err(CommandError::new("Usage: /mine <x> <y> <z>"));
            }
            Ok(GameCommand::Mine {
                pos: parse_block_pos(&args)?,
            })
        }
        "place" => {
            if args.len() != 4 {
                return Err(CommandError::new("Usage: /place <x> <y> <z> <face>"));
            }
            let face = BlockFace::parse(args[3]).map_err(|err| CommandError::new(err.to_string()))?;
            Ok(GameCommand::Place {
                target: parse_block_pos(&args[..3])?,
                face,
            })
        }
        "slot" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: /slot <1-9>"));
            }
            let slot = args[0]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(HotbarSlot::new)
                .ok_or_else(|| CommandError::new(format!("Slot must be 1-{HOTBAR_SIZE}")))?;
            Ok(GameCommand::Slot { slot })
        }
        "give" => parse_give_command(&args),
        "xp" | "experience" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: /xp <amount>"));
            }
            let amount = args[0]
                .parse::<u32>()
                .map_err(|_| CommandError::new("Invalid experience amount"))?;
            Ok(GameCommand::Xp { amount })
        }
        "health" => Ok(GameCommand::Health {
            delta: parse_delta(&args, "/health")?,
        }),
        "energy" => Ok(GameCommand::Energy {
            delta: parse_delta(&args, "/energy")?,
        }),
        "money" | "currency" => Ok(GameCommand::Money {
            delta: parse_delta(&args, "/money")?,
        }),
        "remove" => {
            if !(1..=2).contains(&args.len()) {
                return Err(CommandError::new("Usage: /remove <id> [amount]"));
            }
            let id = args[0]
                .trim_start_matches('#')
                .parse::<u32>()
                .map_err(|_| CommandError::new("Invalid item id"))?;
            let amount = if args.len() == 2 {
                parse_positive_u32(args[1]).map_err(|_| CommandError::new("Invalid remove amount"))?
            } else {
                1
            };
            Ok(GameCommand::Remove {
                id: ItemId(id),
                amount,
            })
        }
        "mode" | "gamemode" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: /mode <single|multi>"));
            }
            let mode = GameMode::parse(args[0]).map_err(|err| CommandError::new(err.to_string()))?;
            Ok(GameCommand::Mode { mode })
        }
        "character" => {
            if args.len() != 1 {
                return Err(CommandError::new("Usage: /character <steve|alex|robot>"));
            }
            let character =
                PlayerCharacter::parse(args[0]).map_err(|err| CommandError::new(err.to_string()))?;
            Ok(GameCommand::Character { character })
        }
        "controls" => Ok(GameCommand::Controls),
        _ => Err(CommandError::new(format!(
            "Unknown command: {cmd}. Try /help"
        ))),
    }
}

fn parse_positive_u32(s: &str) -> Result<u32, ()> {
    let value = s.parse::<u32>().map_err(|_| ())?;
    if value == 0 {
        return Err(());
    }
    Ok(value)
}

fn parse_block_pos(args: &[&str]) -> Result<BlockPos, CommandError> {
    let coord = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|_| CommandError::new(format!("Invalid block coordinate: {s}")))
    };
    Ok(BlockPos::new(coord(args[0])?, coord(args[1])?, coord(args[2])?))
}

fn parse_delta<T: std::str::FromStr>(args: &[&str], usage: &str) -> Result<T, CommandError> {
    if args.len() != 1 {
        return Err(CommandError::new(format!("Usage: {usage} <±amount>")));
    }
    args[0]
        .trim_start_matches('+')
        .parse::<T>()
        .map_err(|_| CommandError::new(format!("Invalid amount: {}", args[0])))
}

/// `/give <kind> <name…> [count]`. Block names that match a material pick up
/// its colour and tag, so `/give block dirt` yields a placeable Dirt Block.
fn parse_give_command(args: &[&str]) -> Result<GameCommand, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::new("Usage: /give <kind> <name> [count]"));
    }
    let kind = ItemKind::parse(args[0]).map_err(|err| CommandError::new(err.to_string()))?;

    let mut name_parts = &args[1..];
    let mut count = 1;
    if name_parts.len() > 1 {
        if let Some(last) = name_parts.last() {
            if last.chars().all(|c| c.is_ascii_digit()) {
                count = parse_positive_u32(last)
                    .map_err(|_| CommandError::new("Invalid give count"))?;
                name_parts = &name_parts[..name_parts.len() - 1];
            }
        }
    }
    let name = name_parts.join(" ");

    let item = match (kind, block_material(&name)) {
        (ItemKind::Block, Some(material)) => NewItem {
            quantity: count,
            ..NewItem::block(material)
        },
        _ => NewItem::new(kind, name, count),
    };
    Ok(GameCommand::Give { item })
}

fn block_material(name: &str) -> Option<Material> {
    let name = name.trim();
    let short = name
        .strip_suffix(" Block")
        .or_else(|| name.strip_suffix(" block"))
        .unwrap_or(name);
    Material::parse(short).ok()
}

pub fn help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  /help".to_string(),
        "  /key <name>                 (w a s d, arrows, space, 1-9, h)".to_string(),
        "  /mine <x> <y> <z>".to_string(),
        "  /place <x> <y> <z> <face>   face = up|down|north|south|east|west".to_string(),
        "  /slot <1-9>".to_string(),
        "  /give <kind> <name> [count] kind = block|tool|resource".to_string(),
        "  /xp <amount>".to_string(),
        "  /health <±amount>".to_string(),
        "  /energy <±amount>".to_string(),
        "  /money <±amount>".to_string(),
        "  /remove <id> [amount]".to_string(),
        "  /mode <single|multi>".to_string(),
        "  /character <steve|alex|robot>".to_string(),
        "  /controls".to_string(),
    ]
}
