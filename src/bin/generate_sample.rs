use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

const ENSLAVERS: [&str; 6] = [
    "John Tibbs",
    "Mary Hardin",
    "Samuel Cole",
    "Eliza Whitfield",
    "Thomas Redd",
    "Harriet Lowe",
];

const SOURCES: [&str; 2] = ["Troy Records", "1850 Slave Schedule"];

const FIRST_NAMES: [&str; 16] = [
    "Mary", "Sam", "Ann", "Peter", "Lucy", "Isaac", "Hannah", "Moses", "Rachel", "Daniel",
    "Milly", "George", "Dinah", "Jacob", "Patsy", "Harry",
];

const DESCRIPTORS: [&str; 5] = ["Female", "Male", "Girl", "Boy", "Infant"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }

    /// `true` with probability `pct` percent.
    fn chance(&mut self, pct: u64) -> bool {
        self.below(100) < pct
    }
}

/// One generated row; every column can be absent.
struct Row {
    enslaver: Option<String>,
    data_source: Option<String>,
    enslaved_name: Option<String>,
    enslaved_age: Option<String>,
    enslaved_genagedesc: Option<String>,
}

fn generate_row(rng: &mut SimpleRng, serial: usize) -> Row {
    let enslaver = (!rng.chance(3)).then(|| rng.pick(&ENSLAVERS).to_string());
    let data_source = (!rng.chance(2)).then(|| rng.pick(&SOURCES).to_string());
    let enslaved_name =
        (!rng.chance(10)).then(|| format!("{} {}", rng.pick(&FIRST_NAMES), serial % 7 + 1));
    let enslaved_age = match rng.below(20) {
        0 => None,
        1 => Some("unknown".to_string()),
        2 => Some("0".to_string()),
        3 => Some((100 + rng.below(8)).to_string()),
        _ => Some(rng.below(80).to_string()),
    };
    let enslaved_genagedesc = (!rng.chance(8)).then(|| rng.pick(&DESCRIPTORS).to_string());

    Row {
        enslaver,
        data_source,
        enslaved_name,
        enslaved_age,
        enslaved_genagedesc,
    }
}

fn string_column<F>(rows: &[Row], get: F) -> StringArray
where
    F: Fn(&Row) -> &Option<String>,
{
    rows.iter().map(|r| get(r).as_deref()).collect()
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..400).map(|i| generate_row(&mut rng, i)).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new("enslaver", DataType::Utf8, true),
        Field::new("data_source", DataType::Utf8, true),
        Field::new("enslaved_name", DataType::Utf8, true),
        Field::new("enslaved_age", DataType::Utf8, true),
        Field::new("enslaved_genagedesc", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(string_column(&rows, |r| &r.enslaver)),
        Arc::new(string_column(&rows, |r| &r.data_source)),
        Arc::new(string_column(&rows, |r| &r.enslaved_name)),
        Arc::new(string_column(&rows, |r| &r.enslaved_age)),
        Arc::new(string_column(&rows, |r| &r.enslaved_genagedesc)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_enslaver_data.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema.clone(), None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write the workbook (the dashboard's default input)
    let xlsx_path = "Final_updated_enslaver_data.xlsx";
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in schema.fields().iter().enumerate() {
        sheet
            .write_string(0, col as u16, name.name())
            .expect("Failed to write header");
    }
    for (i, r) in rows.iter().enumerate() {
        let cells = [
            &r.enslaver,
            &r.data_source,
            &r.enslaved_name,
            &r.enslaved_age,
            &r.enslaved_genagedesc,
        ];
        for (col, cell) in cells.into_iter().enumerate() {
            let Some(text) = cell else { continue };
            let (row, col) = (i as u32 + 1, col as u16);
            // Ages go in as numbers when they parse, as a spreadsheet would hold them.
            match text.parse::<u32>() {
                Ok(n) => sheet.write_number(row, col, n),
                Err(_) => sheet.write_string(row, col, text),
            }
            .expect("Failed to write cell");
        }
    }
    workbook.save(xlsx_path).expect("Failed to save workbook");

    println!(
        "Wrote {} records to {parquet_path} and {xlsx_path}",
        rows.len()
    );
}
