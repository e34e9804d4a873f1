//! Entity record parsing.
//!
//! [`SectionParser`] is the seam between the dispatcher and the record
//! grammar. [`BraceRecordParser`] implements the default grammar: records
//! open with `Label ^{`, close with `}`, and carry `Key=Value` fields.
//! Record IDs are the trailing digits of the label (`StarId12` -> 12).
//! Unknown fields and unknown nested records are ignored.

use crate::dump::DumpError;
use crate::geometry::Point;
use crate::goods::{GOODS_COUNT, GoodsArray, Market};
use crate::graph::GalaxyBuilder;
use crate::id::*;
use crate::model::*;
use crate::reader::{LineReader, is_record_close, record_label, split_field};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::FromStr;

/// Parses the body of one top-level section. Each method is called right
/// after the section opener was read and must consume the section up to
/// and including its closing line.
pub trait SectionParser {
    /// Body of `Player ^{`: exactly one ship, inserted with ID 0.
    fn parse_player<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError>;

    /// Body of `StarList ^{`: stars with their planets, ships and items.
    fn parse_star_list<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError>;

    /// Body of `HoleList ^{`: black holes.
    fn parse_hole_list<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError>;
}

// ===========================================================================
// Raw records
// ===========================================================================

#[derive(Debug, Clone)]
struct Field {
    key: String,
    value: String,
    line: usize,
}

/// One brace-delimited record, read whole before conversion.
#[derive(Debug, Clone)]
struct RawRecord {
    label: String,
    line: usize,
    fields: Vec<Field>,
    children: Vec<RawRecord>,
}

impl RawRecord {
    /// Reads the body of a record whose opener (`label`) was just consumed.
    /// A record cut short by end of stream keeps what was read.
    fn read<R: BufRead>(reader: &mut LineReader<R>, label: &str) -> Result<Self, DumpError> {
        let mut record = RawRecord {
            label: label.to_string(),
            line: reader.line_number(),
            fields: Vec::new(),
            children: Vec::new(),
        };
        while let Some(line) = reader.next_line()? {
            if is_record_close(&line) {
                break;
            }
            if let Some(child) = record_label(&line) {
                let child = child.to_string();
                record.children.push(RawRecord::read(reader, &child)?);
            } else if let Some((key, value)) = split_field(&line) {
                record.fields.push(Field {
                    key: key.to_string(),
                    value: value.to_string(),
                    line: reader.line_number(),
                });
            }
        }
        Ok(record)
    }

    fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn text(&self, key: &str) -> String {
        self.field(key).map(|f| f.value.clone()).unwrap_or_default()
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>, DumpError> {
        self.field(key)
            .map(|f| f.value.parse::<T>().map_err(|_| invalid(f)))
            .transpose()
    }

    fn number_or_default<T: FromStr + Default>(&self, key: &str) -> Result<T, DumpError> {
        Ok(self.number(key)?.unwrap_or_default())
    }

    fn goods(&self, key: &str) -> Result<Option<GoodsArray>, DumpError> {
        let Some(field) = self.field(key) else {
            return Ok(None);
        };
        let values = field
            .value
            .split(',')
            .map(|v| v.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid(field))?;
        let array: [u32; GOODS_COUNT] = values.try_into().map_err(|_| invalid(field))?;
        Ok(Some(GoodsArray(array)))
    }

    /// A market exists when the quantity column is present.
    fn market(&self) -> Result<Option<Market>, DumpError> {
        let Some(quantity) = self.goods(keys::GOODS_QUANTITY)? else {
            return Ok(None);
        };
        Ok(Some(Market {
            quantity,
            sale: self.goods(keys::GOODS_SALE)?.unwrap_or_default(),
            buy: self.goods(keys::GOODS_BUY)?.unwrap_or_default(),
        }))
    }

    /// Trailing digits of the label.
    fn id(&self) -> Result<u32, DumpError> {
        let digits = self.label.len()
            - self
                .label
                .chars()
                .rev()
                .take_while(char::is_ascii_digit)
                .count();
        self.label[digits..].parse().map_err(|_| DumpError::MissingId {
            line: self.line,
            label: self.label.clone(),
        })
    }

    fn children_named<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a RawRecord> + 'a {
        self.children.iter().filter(move |c| c.label == label)
    }

    fn children_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a RawRecord> + 'a {
        self.children.iter().filter(move |c| c.label.starts_with(prefix))
    }
}

fn invalid(field: &Field) -> DumpError {
    DumpError::Field {
        line: field.line,
        key: field.key.clone(),
        value: field.value.clone(),
    }
}

/// Field names and record labels of the default grammar.
pub mod keys {
    pub const STAR_PREFIX: &str = "StarId";
    pub const PLANET_PREFIX: &str = "PlanetId";
    pub const SHIP_PREFIX: &str = "ShipId";
    pub const HOLE_PREFIX: &str = "HoleId";
    pub const ITEM_PREFIX: &str = "ItemId";

    pub const PLANET_LIST: &str = "PlanetList";
    pub const SHIP_LIST: &str = "ShipList";
    pub const JUNK: &str = "Junk";
    pub const EQUIPPED: &str = "EqList";
    pub const ARTIFACTS: &str = "ArtsList";
    pub const STORAGE: &str = "Storage";
    pub const SHOP: &str = "EqShop";
    pub const TREASURE: &str = "Treasure";

    pub const GOODS_QUANTITY: &str = "ShopGoods";
    pub const GOODS_SALE: &str = "ShopGoodsSale";
    pub const GOODS_BUY: &str = "ShopGoodsBuy";

    /// Equipment fields mapped onto named struct members; every other
    /// equipment field becomes an extra attribute.
    pub const ITEM_FIELDS: [&str; 8] = [
        "IName",
        "IType",
        "ISize",
        "IOwner",
        "ICost",
        "ITechLevel",
        "IDurability",
        "IBonus",
    ];
}

// ===========================================================================
// Default grammar
// ===========================================================================

/// Parser for the default brace-record grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceRecordParser;

impl BraceRecordParser {
    fn equipment(record: &RawRecord, location: Location) -> Result<Equipment, DumpError> {
        let extra = record
            .fields
            .iter()
            .filter(|f| !keys::ITEM_FIELDS.contains(&f.key.as_str()))
            .map(|f| (f.key.clone(), AttrValue::parse(&f.value)))
            .collect::<BTreeMap<_, _>>();
        Ok(Equipment {
            id: EquipmentId(record.id()?),
            name: record.text("IName"),
            kind: record.text("IType"),
            size: record.number_or_default("ISize")?,
            owner: record.text("IOwner"),
            cost: record.number_or_default("ICost")?,
            tech_level: record.number_or_default("ITechLevel")?,
            durability: record.number_or_default("IDurability")?,
            bonus: record.text("IBonus"),
            location,
            extra,
        })
    }

    /// Inserts every `ItemId` record found in the `list` children of `owner`.
    fn add_items(
        owner: &RawRecord,
        list: &str,
        location: Location,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        for container in owner.children_named(list) {
            for item in container.children_with_prefix(keys::ITEM_PREFIX) {
                galaxy.add_equipment(Self::equipment(item, location)?);
            }
        }
        Ok(())
    }

    fn add_ship(
        record: &RawRecord,
        id: ShipId,
        enclosing_star: Option<StarId>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        let star = match record.number::<u32>("IStarId")? {
            Some(raw) => StarId::from_raw(raw),
            None => enclosing_star,
        };
        galaxy.add_ship(Ship {
            id,
            name: record.text("IName"),
            race: record.text("IRace"),
            star,
            market: record.market()?,
        });
        Self::add_items(record, keys::EQUIPPED, Location::ShipEquipped(id), galaxy)?;
        Self::add_items(record, keys::ARTIFACTS, Location::ShipStorage(id), galaxy)?;
        Self::add_items(record, keys::STORAGE, Location::ShipStorage(id), galaxy)?;
        Self::add_items(record, keys::SHOP, Location::ShipShop(id), galaxy)?;
        Ok(())
    }

    fn add_planet(
        record: &RawRecord,
        star: StarId,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        let id = PlanetId(record.id()?);
        galaxy.add_planet(Planet {
            id,
            star,
            name: record.text("PlanetName"),
            owner: record.text("Owner"),
            race: record.text("Race"),
            economy: record.text("Economy"),
            tech_level: record.number_or_default("CurrentTech")?,
            size: record.number_or_default("ISize")?,
            market: record.market()?,
        });
        Self::add_items(record, keys::SHOP, Location::PlanetShop(id), galaxy)?;
        Self::add_items(record, keys::STORAGE, Location::PlanetStorage(id), galaxy)?;
        Self::add_items(record, keys::TREASURE, Location::PlanetTreasure(id), galaxy)?;
        Ok(())
    }

    fn add_star(record: &RawRecord, galaxy: &mut GalaxyBuilder) -> Result<(), DumpError> {
        let id = StarId(record.id()?);
        galaxy.add_star(Star {
            id,
            name: record.text("StarName"),
            owner: record.text("Owners"),
            position: Point::new(
                record.number_or_default("X")?,
                record.number_or_default("Y")?,
            ),
            dom_series: record.text("DomSeries"),
        });
        for list in record.children_named(keys::PLANET_LIST) {
            for planet in list.children_with_prefix(keys::PLANET_PREFIX) {
                Self::add_planet(planet, id, galaxy)?;
            }
        }
        for list in record.children_named(keys::SHIP_LIST) {
            for ship in list.children_with_prefix(keys::SHIP_PREFIX) {
                Self::add_ship(ship, ShipId(ship.id()?), Some(id), galaxy)?;
            }
        }
        Self::add_items(record, keys::JUNK, Location::StarJunk(id), galaxy)
    }

    fn add_black_hole(record: &RawRecord, galaxy: &mut GalaxyBuilder) -> Result<(), DumpError> {
        galaxy.add_black_hole(BlackHole {
            id: BlackHoleId(record.id()?),
            star1: StarId(record.number_or_default("Star1Id")?),
            star2: StarId(record.number_or_default("Star2Id")?),
            turns_to_close: record.number_or_default("TurnsToClose")?,
        });
        Ok(())
    }

    /// Reads the records of a list section until its close, converting the
    /// ones whose label starts with `prefix`.
    fn read_list<R, F>(
        reader: &mut LineReader<R>,
        prefix: &str,
        galaxy: &mut GalaxyBuilder,
        mut convert: F,
    ) -> Result<(), DumpError>
    where
        R: BufRead,
        F: FnMut(&RawRecord, &mut GalaxyBuilder) -> Result<(), DumpError>,
    {
        while let Some(line) = reader.next_line()? {
            if is_record_close(&line) {
                break;
            }
            let Some(label) = record_label(&line) else {
                continue;
            };
            if label.starts_with(prefix) {
                let label = label.to_string();
                let record = RawRecord::read(reader, &label)?;
                convert(&record, galaxy)?;
            } else {
                reader.skip_record()?;
            }
        }
        Ok(())
    }
}

impl SectionParser for BraceRecordParser {
    fn parse_player<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        let record = RawRecord::read(reader, "Player")?;
        Self::add_ship(&record, ShipId::PLAYER, None, galaxy)
    }

    fn parse_star_list<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        Self::read_list(reader, keys::STAR_PREFIX, galaxy, Self::add_star)
    }

    fn parse_hole_list<R: BufRead>(
        &mut self,
        reader: &mut LineReader<R>,
        galaxy: &mut GalaxyBuilder,
    ) -> Result<(), DumpError> {
        Self::read_list(reader, keys::HOLE_PREFIX, galaxy, Self::add_black_hole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goods::Goods;
    use crate::graph::Galaxy;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Galaxy, DumpError> {
        Galaxy::from_dump(Cursor::new(text))
    }

    const STARS: &str = "\
StarList ^{
StarId3 ^{
StarName=Vega
X=12.5
Y=-4
Owners=Klings
DomSeries=Xaltec
PlanetList ^{
PlanetId8 ^{
PlanetName=Boyd
Owner=Maloc
Race=Maloc
Economy=Agricultural
CurrentTech=4
ISize=5
ShopGoods=1,2,3,4,5,6,7,8
ShopGoodsSale=10,20,30,40,50,60,70,80
ShopGoodsBuy=9,19,29,39,49,59,69,79
Treasure ^{
ItemId40 ^{
IName=Old radar
IType=Radar
Depth=3
}
}
}
}
ShipList ^{
ShipId21 ^{
IName=Tramp
IRace=Normal
}
ShipId22 ^{
IName=Drifter
IRace=Pirate
IStarId=0
EqList ^{
ItemId41 ^{
IName=Gun
ICost=500
IDurability=0.5
}
}
}
}
Junk ^{
ItemId42 ^{
IName=Scrap
}
}
}
}
";

    #[test]
    fn star_with_nested_entities() {
        let g = parse(STARS).unwrap();
        let star = g.star(StarId(3));
        assert_eq!(star.name, "Vega");
        assert_eq!(star.position, Point::new(12.5, -4.0));
        assert_eq!(star.effective_owner(), "Xaltec");

        let planet = g.planet(PlanetId(8));
        assert_eq!(planet.star, StarId(3));
        assert_eq!(planet.tech_level, 4);
        let market = planet.market.as_ref().unwrap();
        assert_eq!(market.quantity[Goods::Narcotics], 8);
        assert_eq!(market.sale[Goods::Food], 10);
        assert_eq!(market.buy[Goods::Arms], 69);

        assert_eq!(g.ship(ShipId(21)).star, Some(StarId(3)));
        assert_eq!(g.ship(ShipId(22)).star, None);
        assert!(g.ship(ShipId(21)).market.is_none());

        let treasure = g.equipment(EquipmentId(40));
        assert_eq!(treasure.location, Location::PlanetTreasure(PlanetId(8)));
        assert_eq!(treasure.depth(), 3);
        assert_eq!(treasure.kind, "Radar");

        let gun = g.equipment(EquipmentId(41));
        assert_eq!(gun.location, Location::ShipEquipped(ShipId(22)));
        assert_eq!(gun.cost, 500);
        assert_eq!(gun.durability, 0.5);
        assert!(gun.extra.is_empty());

        assert_eq!(
            g.equipment(EquipmentId(42)).location,
            Location::StarJunk(StarId(3))
        );
        assert_eq!(g.markets_count(), 1);
    }

    #[test]
    fn player_is_always_ship_zero() {
        let g = parse("Player ^{\nIName=Hero\nIRace=Ranger\nIStarId=3\n}\n").unwrap();
        let player = g.player();
        assert_eq!(player.id, ShipId(0));
        assert_eq!(player.name, "Hero");
        assert_eq!(player.star, Some(StarId(3)));
    }

    #[test]
    fn hole_list() {
        let g = parse(
            "HoleList ^{\nHoleId5 ^{\nStar1Id=1\nStar2Id=2\nTurnsToClose=-3\n}\nOther ^{\nA=1\n}\n}\n",
        )
        .unwrap();
        let hole = g.black_hole(BlackHoleId(5));
        assert_eq!(hole.star1, StarId(1));
        assert_eq!(hole.star2, StarId(2));
        assert_eq!(hole.turns_to_close, -3);
        assert_eq!(g.black_hole_count(), 1);
    }

    #[test]
    fn bad_number_reports_line_and_key() {
        let err = parse("StarList ^{\nStarId1 ^{\nX=far\n}\n}\n").unwrap_err();
        match err {
            DumpError::Field { line, key, value } => {
                assert_eq!(line, 3);
                assert_eq!(key, "X");
                assert_eq!(value, "far");
            }
            other => panic!("expected Field, got: {other:?}"),
        }
    }

    #[test]
    fn short_goods_column_is_rejected() {
        let err = parse("Player ^{\nShopGoods=1,2,3\n}\n").unwrap_err();
        assert!(matches!(err, DumpError::Field { ref key, .. } if key == "ShopGoods"));
    }

    #[test]
    fn label_without_id_is_rejected() {
        let err = parse("StarList ^{\nStarIdX ^{\n}\n}\n").unwrap_err();
        assert!(matches!(err, DumpError::MissingId { ref label, .. } if label == "StarIdX"));
    }

    #[test]
    fn truncated_section_keeps_parsed_records() {
        let g = parse("StarList ^{\nStarId1 ^{\nStarName=A\n}\nStarId2 ^{\nStarName=B\n").unwrap();
        assert_eq!(g.star_count(), 2);
        assert_eq!(g.star(StarId(2)).name, "B");
    }
}
