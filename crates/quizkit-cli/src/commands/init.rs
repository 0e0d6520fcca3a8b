//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizkit.toml
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to banks/example.toml");
    println!("  2. Run: quizkit validate --bank banks/example.toml");
    println!("  3. Run: quizkit play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

bank = "banks/example.toml"
# report_dir = "reports"

[session]
question_count = 10
seconds_per_question = 30
timing_enabled = true
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A handful of general-knowledge questions to get started"

[[questions]]
id = "capital-france"
text = "What is the capital of France?"
options = ["Berlin", "Paris", "Madrid", "Rome"]
answer = 1
explanation = "Paris has been the French capital for most of the last thousand years."
tags = ["geography"]

[[questions]]
id = "spider-legs"
text = "How many legs does a spider have?"
options = ["Six", "Eight", "Ten", "Twelve"]
answer = 1
explanation = "Spiders are arachnids, and arachnids have eight legs."
tags = ["nature"]

[[questions]]
id = "largest-planet"
text = "Which is the largest planet in the solar system?"
options = ["Saturn", "Neptune", "Jupiter", "Earth"]
answer = 2
explanation = "Jupiter is more than twice as massive as all the other planets combined."
tags = ["science"]

[[questions]]
id = "water-boiling"
text = "At sea level, water boils at what temperature in Celsius?"
options = ["90", "100", "110", "120"]
answer = 1
explanation = "At one standard atmosphere water boils at 100 degrees Celsius."
tags = ["science"]

[[questions]]
id = "longest-river"
text = "Which river is usually listed as the longest in the world?"
options = ["Amazon", "Yangtze", "Mississippi", "Nile"]
answer = 3
explanation = "The Nile is about 6,650 km long, though some measurements favour the Amazon."
tags = ["geography"]

[[questions]]
id = "hexagon-sides"
text = "How many sides does a hexagon have?"
options = ["Five", "Six", "Seven", "Eight"]
answer = 1
explanation = "Hex comes from the Greek word for six."
tags = ["math"]

[[questions]]
id = "red-planet"
text = "Which planet is known as the Red Planet?"
options = ["Venus", "Mercury", "Mars", "Jupiter"]
answer = 2
explanation = "Iron oxide dust gives Mars its reddish colour."
tags = ["science"]

[[questions]]
id = "prime-two"
text = "What is the only even prime number?"
options = ["0", "2", "4", "6"]
answer = 1
explanation = "Every other even number is divisible by 2."
tags = ["math"]

[[questions]]
id = "ocean-largest"
text = "Which is the largest ocean?"
options = ["Atlantic", "Indian", "Arctic", "Pacific"]
answer = 3
explanation = "The Pacific covers roughly a third of the Earth's surface."
tags = ["geography"]

[[questions]]
id = "honey-bees"
text = "What do bees collect from flowers to make honey?"
options = ["Pollen", "Nectar", "Sap", "Dew"]
answer = 1
explanation = "Bees turn nectar into honey by evaporation and enzymes."
tags = ["nature"]

[[questions]]
id = "speed-of-light"
text = "Roughly how fast does light travel in a vacuum?"
options = ["300 km/s", "3,000 km/s", "300,000 km/s", "3,000,000 km/s"]
answer = 2
explanation = "Light travels at about 299,792 km per second."
tags = ["science"]

[[questions]]
id = "square-root"
text = "What is the square root of 81?"
options = ["7", "8", "9", "10"]
answer = 2
explanation = "9 times 9 is 81."
tags = ["math"]
"#;
