//! Parametric bill-of-materials estimator.
//!
//! Each project type has its own hand-tuned formula set. All quantities and
//! prices are rounded up so the list never under-provisions material.
//! Dimensions are in meters, prices in SEK.

use crate::domain::{Dimensions, MaterialLine, ProjectType};

/// Extra length added to sawn timber and sheet goods for offcuts.
const WASTE: f64 = 1.1;

/// Shared price table for stock items.
#[derive(Debug, Clone, Copy)]
enum Stock {
    Stud45x95,
    Joist45x145,
    Beam45x195,
    ConcretePlinth,
    Screw5x80,
    Screw5x50,
    AngleBracket,
    ConcreteCountertop,
    Decking28x120,
}

impl Stock {
    const fn unit_price(self) -> f64 {
        match self {
            Self::Stud45x95 => 45.0,
            Self::Joist45x145 => 65.0,
            Self::Beam45x195 => 85.0,
            Self::ConcretePlinth => 150.0,
            Self::Screw5x80 => 0.8,
            Self::Screw5x50 => 0.5,
            Self::AngleBracket => 15.0,
            Self::ConcreteCountertop => 800.0,
            Self::Decking28x120 => 55.0,
        }
    }
}

/// Collects material lines, rounding every price up.
#[derive(Default)]
struct Bill(Vec<MaterialLine>);

impl Bill {
    /// Adds `quantity` units at `unit_price` each.
    fn add(&mut self, name: &str, quantity: f64, unit: &str, unit_price: f64) -> &mut Self {
        self.priced(name, quantity, unit, quantity * unit_price)
    }

    fn stock(&mut self, name: &str, quantity: f64, unit: &str, stock: Stock) -> &mut Self {
        self.add(name, quantity, unit, stock.unit_price())
    }

    /// Adds a line whose price is not a plain quantity times unit price.
    fn priced(&mut self, name: &str, quantity: f64, unit: &str, price: f64) -> &mut Self {
        self.0.push(MaterialLine::new(name, quantity, unit, price.ceil()));
        self
    }

    fn finish(self) -> Vec<MaterialLine> {
        self.0
    }
}

/// Meters of timber for `length` meters of members, waste included.
fn timber(length: f64) -> f64 {
    (length * WASTE).ceil()
}

/// Estimates the bill of materials for a project.
///
/// Total over its input: invalid dimensions are treated as zero and
/// unrecognised project types get a generic frame estimate.
pub fn estimate(project_type: &ProjectType, dimensions: Dimensions) -> Vec<MaterialLine> {
    let dim = dimensions.sanitized();

    match project_type {
        ProjectType::OutdoorKitchen => outdoor_kitchen(dim),
        ProjectType::Deck => deck(dim),
        ProjectType::Shed => shed(dim),
        ProjectType::Pergola => pergola(dim),
        ProjectType::Fence => fence(dim),
        ProjectType::Carport => carport(dim),
        ProjectType::PlanterBox => planter_box(dim),
        ProjectType::Playhouse => playhouse(dim),
        ProjectType::Greenhouse => greenhouse(dim),
        ProjectType::Other | ProjectType::Unknown(_) => basic_frame(dim),
    }
}

fn outdoor_kitchen(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    // Plinth grid at 80 cm
    let plinth_rows = (depth / 0.8).ceil() + 1.0;
    let plinth_cols = (width / 0.8).ceil() + 1.0;
    let plinths = plinth_rows * plinth_cols;
    bill.stock("Betongplint 200x200", plinths, "st", Stock::ConcretePlinth);

    // Floor joists at 60 cm, spanning the depth
    let joists = (width / 0.6).ceil() + 1.0;
    bill.stock(
        "Regel 45x145 (golv)",
        timber(joists * depth),
        "m",
        Stock::Joist45x145,
    );

    let posts = 4.0 + (width / 1.2).floor();
    bill.stock(
        "Regel 45x95 (stolpar)",
        timber(posts * height),
        "m",
        Stock::Stud45x95,
    );

    let counter_area = width * depth;
    bill.priced(
        "Bänkskiva (betong/komposit)",
        (counter_area * 10.0).ceil() / 10.0,
        "m²",
        counter_area * Stock::ConcreteCountertop.unit_price(),
    );

    // Top and bottom rails around the perimeter
    let frame = (width * 2.0 + depth * 2.0) * 2.0;
    bill.stock(
        "Regel 45x95 (stomme)",
        timber(frame),
        "m",
        Stock::Stud45x95,
    );

    let screws = (plinths * 4.0 + joists * 6.0 + posts * 8.0 + 100.0).ceil();
    bill.stock("Skruv 5x80mm rostfri", screws, "st", Stock::Screw5x80);

    let brackets = posts * 2.0 + joists * 2.0;
    bill.stock("Vinkelbeslag", brackets, "st", Stock::AngleBracket);

    bill.finish()
}

fn deck(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions { width, depth, .. } = dim;
    let area = width * depth;
    let mut bill = Bill::default();

    let plinths = (area / 2.0).ceil() + 4.0;
    bill.stock("Betongplint 200x200", plinths, "st", Stock::ConcretePlinth);

    let bearers = (width / 0.6).ceil() + 1.0;
    bill.stock(
        "Regel 45x145 (bärläkt)",
        timber(bearers * depth),
        "m",
        Stock::Joist45x145,
    );

    // 120 mm boards
    let decking = (area / 0.12 * WASTE).ceil();
    bill.stock(
        "Trall 28x120 tryckimpregnerad",
        decking,
        "m",
        Stock::Decking28x120,
    );

    let screws = (area * 25.0).ceil();
    bill.stock("Trallskruv 5x50 rostfri", screws, "st", Stock::Screw5x50);

    bill.finish()
}

fn shed(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    bill.stock("Betongplint 200x200", 6.0, "st", Stock::ConcretePlinth);

    let sill = (width + depth) * 2.0;
    bill.stock("Regel 45x145 (syll)", timber(sill), "m", Stock::Joist45x145);

    let studs = 4.0 + ((width + depth) / 1.2).ceil() * 2.0;
    bill.stock(
        "Regel 45x95 (stolpar)",
        timber(studs * height),
        "m",
        Stock::Stud45x95,
    );

    bill.stock(
        "Regel 45x195 (takstolar)",
        (width * 3.0).ceil(),
        "m",
        Stock::Beam45x195,
    );

    bill.stock("Skruv 5x80mm", 300.0, "st", Stock::Screw5x80);

    bill.finish()
}

fn pergola(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    // Four posts, 50 cm below ground
    bill.add(
        "Stolpe 95x95 tryckimpregnerad",
        timber(4.0 * (height + 0.5)),
        "m",
        120.0,
    );

    bill.stock(
        "Regel 45x195 (hammarband)",
        timber((width + depth) * 2.0),
        "m",
        Stock::Beam45x195,
    );

    let battens = (width / 0.6).ceil();
    bill.stock(
        "Regel 45x145 (takreglar)",
        timber(battens * depth),
        "m",
        Stock::Joist45x145,
    );

    bill.add("Stolpsko justerbar", 4.0, "st", 250.0);
    bill.stock("Skruv 5x80mm rostfri", 150.0, "st", Stock::Screw5x80);

    bill.finish()
}

/// Width is the fence length.
fn fence(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions { width, height, .. } = dim;
    let mut bill = Bill::default();

    // A post every 2 m
    let posts = (width / 2.0).ceil() + 1.0;
    bill.add(
        "Stolpe 70x70 tryckimpregnerad",
        timber(posts * (height + 0.5)),
        "m",
        80.0,
    );

    // Two rails per section
    bill.stock("Regel 45x95", timber(width * 2.0), "m", Stock::Stud45x95);

    let boards = (width / 0.12).ceil();
    bill.add("Staketbräda 22x120", timber(boards * height), "m", 35.0);

    bill.add("Skruv 4x50mm rostfri", boards * 4.0, "st", 0.4);

    bill.finish()
}

fn carport(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    let posts = if width > 4.0 { 6.0 } else { 4.0 };
    bill.add(
        "Stolpe 95x95 tryckimpregnerad",
        timber(posts * (height + 0.5)),
        "m",
        120.0,
    );
    bill.add("Stolpsko justerbar", posts, "st", 250.0);

    bill.add("Limträbalk 56x180", timber(width * 2.0), "m", 150.0);

    let joists = (width / 0.6).ceil();
    bill.stock(
        "Regel 45x195 (takbalkar)",
        timber(joists * depth),
        "m",
        Stock::Beam45x195,
    );

    let roof = width * depth;
    bill.add("Takplywood 18mm", (roof * 1.1).ceil(), "m²", 180.0);
    bill.add("Takpapp YEP 2500", (roof * 1.2).ceil(), "m²", 45.0);
    bill.add("Takplåt trapets", (roof * 1.1).ceil(), "m²", 120.0);

    bill.stock("Skruv 5x80mm rostfri", 200.0, "st", Stock::Screw5x80);

    bill.finish()
}

fn planter_box(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    // Stacked 120 mm boards around the sides
    let side_length = (width * 2.0 + depth * 2.0) * (height / 0.12).ceil();
    bill.add(
        "Bräda 28x120 tryckimpregnerad",
        timber(side_length),
        "m",
        45.0,
    );

    bill.add(
        "Regel 45x45 tryckimpregnerad",
        timber(4.0 * height),
        "m",
        30.0,
    );

    let bottom = width * depth;
    bill.add("Bräda 22x95 (botten)", timber(bottom / 0.1), "m", 25.0);

    let fabric = (width * depth + (width + depth) * 2.0 * height) * 1.2;
    bill.add("Markduk", fabric.ceil(), "m²", 15.0);

    bill.add(
        "Skruv 4x50mm rostfri",
        (side_length * 2.0).ceil(),
        "st",
        0.4,
    );

    bill.finish()
}

fn playhouse(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    bill.add("Betongplatta 40x40", 4.0, "st", 50.0);

    let floor_joists = (width + depth) * 2.0 + (width / 0.4).ceil() * depth;
    bill.stock("Regel 45x95", timber(floor_joists), "m", Stock::Stud45x95);

    bill.add("Plywood 12mm", timber(width * depth), "m²", 120.0);

    let studs = 4.0 + ((width + depth) / 0.8).ceil() * 2.0;
    bill.add("Regel 45x70 (stolpar)", timber(studs * height), "m", 35.0);

    let wall_area = (width + depth) * 2.0 * height;
    bill.add(
        "Fasadpanel spontad",
        (wall_area * 1.15).ceil(),
        "m²",
        150.0,
    );

    bill.add("Plywood 9mm (tak)", (width * depth * 1.2).ceil(), "m²", 90.0);
    bill.add("Takshingel", (width * depth * 1.3).ceil(), "m²", 80.0);

    bill.priced("Dörr (barnstorlek)", 1.0, "st", 500.0);
    bill.priced("Litet fönster", 1.0, "st", 300.0);

    // One litre covers about 8 m²
    bill.add("Utomhusfärg", (wall_area / 8.0).ceil(), "liter", 200.0);

    bill.add("Skruv diverse", 200.0, "st", 0.6);

    bill.finish()
}

fn greenhouse(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions {
        width,
        depth,
        height,
    } = dim;
    let mut bill = Bill::default();

    // 40x40 cm tiles
    let floor = width * depth;
    bill.add("Markplatta 40x40", (floor / 0.16).ceil(), "st", 30.0);

    let frame = (width + depth) * 2.0 * 2.0 + height * 4.0;
    bill.add("Aluminiumram/träram", timber(frame), "m", 80.0);

    let wall_area = (width + depth) * 2.0 * height;
    bill.add(
        "Kanalplast/polykarbonat 10mm",
        timber(wall_area + floor),
        "m²",
        180.0,
    );

    bill.priced("Växthusdörr", 1.0, "st", 1200.0);

    let vents = (width / 2.0).ceil();
    bill.add("Takfönster ventilation", vents, "st", 400.0);

    bill.add("Hyllplan aluminium", (width * 2.0).ceil(), "m", 120.0);

    bill.finish()
}

/// Generic frame: perimeter studs and a fixed box of screws.
fn basic_frame(dim: Dimensions) -> Vec<MaterialLine> {
    let Dimensions { width, depth, .. } = dim;
    let mut bill = Bill::default();

    bill.stock(
        "Regel 45x95",
        timber((width + depth) * 4.0),
        "m",
        Stock::Stud45x95,
    );
    bill.stock("Skruv 5x80mm", 100.0, "st", Stock::Screw5x80);

    bill.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_types() -> Vec<ProjectType> {
        let mut types = ProjectType::KNOWN.to_vec();
        types.push(ProjectType::Unknown("no-such-type".to_string()));
        types
    }

    fn quantity(lines: &[MaterialLine], name: &str) -> f64 {
        lines
            .iter()
            .find(|l| l.name == name)
            .unwrap_or_else(|| panic!("missing line {name}"))
            .quantity
    }

    #[test]
    fn deck_golden_values() {
        let lines = estimate(&ProjectType::Deck, Dimensions::new(4.0, 3.0, 1.0));

        assert_eq!(lines.len(), 4);
        assert_eq!(quantity(&lines, "Betongplint 200x200"), 10.0);
        assert_eq!(quantity(&lines, "Trall 28x120 tryckimpregnerad"), 111.0);
        assert_eq!(quantity(&lines, "Trallskruv 5x50 rostfri"), 300.0);
        // 8 bearers of 3 m plus waste
        assert_eq!(quantity(&lines, "Regel 45x145 (bärläkt)"), 27.0);
        assert_eq!(lines[1].price, 27.0 * 65.0);
        assert_eq!(lines[2].price, 111.0 * 55.0);
    }

    #[test]
    fn unknown_type_gets_two_line_frame() {
        let lines = estimate(
            &ProjectType::Unknown("no-such-type".to_string()),
            Dimensions::new(3.0, 3.0, 1.0),
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Regel 45x95");
        assert_eq!(lines[0].quantity, ((3.0_f64 + 3.0) * 4.0 * 1.1).ceil());
        assert_eq!(lines[0].price, lines[0].quantity * 45.0);
        assert_eq!(lines[1].name, "Skruv 5x80mm");
        assert_eq!(lines[1].quantity, 100.0);
        assert_eq!(lines[1].price, 80.0);
    }

    #[test]
    fn other_uses_generic_frame_too() {
        let dims = Dimensions::new(2.0, 1.0, 1.0);
        assert_eq!(
            estimate(&ProjectType::Other, dims),
            estimate(&ProjectType::Unknown(String::new()), dims)
        );
    }

    #[test]
    fn every_type_is_total_and_non_negative() {
        let samples = [
            Dimensions::new(0.5, 0.5, 0.5),
            Dimensions::new(3.0, 2.0, 2.4),
            Dimensions::new(4.2, 3.7, 1.1),
            Dimensions::new(250.0, 120.0, 40.0),
        ];

        for project_type in all_types() {
            for dims in samples {
                let lines = estimate(&project_type, dims);
                assert!(!lines.is_empty(), "{project_type} produced no lines");
                for line in &lines {
                    assert!(line.quantity >= 0.0, "{project_type}: {line:?}");
                    assert!(line.price >= 0.0, "{project_type}: {line:?}");
                    assert!(line.quantity.is_finite() && line.price.is_finite());
                }
            }
        }
    }

    #[test]
    fn quantities_and_prices_are_rounded_up() {
        let dims = Dimensions::new(3.3, 2.7, 1.9);
        for project_type in all_types() {
            for line in estimate(&project_type, dims) {
                assert_eq!(line.price, line.price.ceil(), "{line:?}");
                if line.unit == "m²" && line.name.starts_with("Bänkskiva") {
                    // Countertop area is kept to one decimal
                    let tenths = line.quantity * 10.0;
                    assert!((tenths - tenths.round()).abs() < 1e-9, "{line:?}");
                    assert!(line.quantity >= dims.width * dims.depth);
                } else {
                    assert_eq!(line.quantity, line.quantity.ceil(), "{line:?}");
                }
            }
        }
    }

    #[test]
    fn invalid_dimensions_do_not_panic() {
        let dims = Dimensions::new(f64::NAN, -1.0, f64::INFINITY);
        for project_type in all_types() {
            let lines = estimate(&project_type, dims);
            assert!(lines.iter().all(|l| l.quantity >= 0.0 && l.price >= 0.0));
        }
    }

    #[test]
    fn outdoor_kitchen_line_items() {
        let lines = estimate(&ProjectType::OutdoorKitchen, Dimensions::new(2.4, 0.8, 0.9));
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Betongplint 200x200",
                "Regel 45x145 (golv)",
                "Regel 45x95 (stolpar)",
                "Bänkskiva (betong/komposit)",
                "Regel 45x95 (stomme)",
                "Skruv 5x80mm rostfri",
                "Vinkelbeslag",
            ]
        );

        // 2 rows x 4 columns of plinths
        assert_eq!(quantity(&lines, "Betongplint 200x200"), 8.0);
        // 6 posts and 5 joists, two brackets each
        assert_eq!(quantity(&lines, "Vinkelbeslag"), 22.0);
        assert_eq!(quantity(&lines, "Skruv 5x80mm rostfri"), 210.0);
    }

    #[test]
    fn carport_adds_posts_when_wide() {
        let narrow = estimate(&ProjectType::Carport, Dimensions::new(4.0, 6.0, 2.2));
        let wide = estimate(&ProjectType::Carport, Dimensions::new(4.5, 6.0, 2.2));
        assert_eq!(quantity(&narrow, "Stolpsko justerbar"), 4.0);
        assert_eq!(quantity(&wide, "Stolpsko justerbar"), 6.0);
    }

    #[test]
    fn playhouse_specialty_items_have_fixed_prices() {
        let lines = estimate(&ProjectType::Playhouse, Dimensions::new(2.0, 2.0, 1.8));
        let door = lines.iter().find(|l| l.name == "Dörr (barnstorlek)").unwrap();
        let window = lines.iter().find(|l| l.name == "Litet fönster").unwrap();
        assert_eq!((door.quantity, door.price), (1.0, 500.0));
        assert_eq!((window.quantity, window.price), (1.0, 300.0));
    }

    #[test]
    fn greenhouse_vents_scale_with_width() {
        let lines = estimate(&ProjectType::Greenhouse, Dimensions::new(5.0, 3.0, 2.2));
        assert_eq!(quantity(&lines, "Takfönster ventilation"), 3.0);
        assert_eq!(quantity(&lines, "Växthusdörr"), 1.0);
    }

    #[test]
    fn fence_screws_are_priced_up_to_whole_kronor() {
        let lines = estimate(&ProjectType::Fence, Dimensions::new(1.0, 0.1, 1.0));
        // 9 boards, 4 screws each at 0.40
        let screws = lines.iter().find(|l| l.name == "Skruv 4x50mm rostfri").unwrap();
        assert_eq!(screws.quantity, 36.0);
        assert_eq!(screws.price, 15.0);
    }
}
