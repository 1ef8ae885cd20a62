use anyhow::Result;
use std::{fs, path::Path};

pub const LIST_DIR: &str = "listes";

/// Word lists written into a freshly created `listes/` directory. Words are
/// newline-separated, groups split by a literal `-----` line.
const SEED_LISTS: [(&str, &str); 3] = [
    (
        "liste_par_defaut.txt",
        "chat\nchien\noiseau\npoisson\n-----\nmaison\nvoiture\narbre\nfleur\n-----\nmanger\nboire\ndormir\njouer",
    ),
    (
        "vocabulaire_medical.txt",
        "stéthoscope\nthermomètre\ntensiomètre\n-----\nsymptôme\ndiagnostic\ntraitement\n-----\nmédecin\ninfirmière\npatient",
    ),
    (
        "animaux_ferme.txt",
        "vache\ncochon\nmouton\n-----\npoule\ncanard\noie\n-----\ncheval\nâne\nchèvre",
    ),
];

/// Creates `listes/` under `root` and seeds it with the default word lists.
///
/// Only runs when the directory is absent; an existing directory is left
/// untouched, whatever it contains. Returns whether seeding happened.
pub fn ensure_word_lists(root: &Path) -> Result<bool> {
    let dir = root.join(LIST_DIR);

    if dir.exists() {
        return Ok(false);
    }

    fs::create_dir_all(&dir)?;

    for (name, content) in SEED_LISTS {
        fs::write(dir.join(name), content)?;
        println!("Created {LIST_DIR}/{name}");
    }

    Ok(true)
}
