use guardpatch_core::config::{DEFAULT_IMPORT_LINE, DEFAULT_MARKER, DEFAULT_SNIPPET};
use guardpatch_core::{run, PatchConfig, PatchOutcome, PatchSpec, RunOptions};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const TRY_HANDLER: &str = r#"import { NextResponse } from 'next/server';
import { createClient } from '@/lib/supabase/server';

export async function POST(request: Request) {
  try {
    const body = await request.json();
    return NextResponse.json({ ok: true, body });
  } catch (error) {
    return NextResponse.json({ error: 'Internal server error' }, { status: 500 });
  }
}
"#;

const PLAIN_HANDLER: &str = r#"import { NextResponse } from 'next/server';

export async function GET(request: Request) {
  return NextResponse.json({ ok: true });
}
"#;

const ARROW_HANDLER: &str = r#"import { NextResponse } from 'next/server';

export const GET = async () => NextResponse.json({ ok: true });
"#;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    PathBuf::from(rel)
}

fn config(targets: Vec<PathBuf>) -> PatchConfig {
    PatchConfig {
        targets,
        spec: PatchSpec::default(),
    }
}

fn options(root: &Path, jobs: usize) -> RunOptions {
    RunOptions {
        root: root.to_path_buf(),
        jobs,
        dry_run: false,
    }
}

#[test]
fn test_batch_outcomes_in_order() {
    let dir = tempdir().unwrap();
    let targets = vec![
        write(dir.path(), "src/app/api/a/route.ts", TRY_HANDLER),
        PathBuf::from("src/app/api/missing/route.ts"),
        write(dir.path(), "src/app/api/b/route.ts", PLAIN_HANDLER),
        write(dir.path(), "src/app/api/c/route.ts", ARROW_HANDLER),
    ];

    let reports = run(&config(targets.clone()), &options(dir.path(), 1)).unwrap();

    let paths: Vec<_> = reports.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, targets);
    assert_eq!(reports[0].outcome, PatchOutcome::FullyPatched);
    assert!(matches!(reports[1].outcome, PatchOutcome::Failed(_)));
    assert_eq!(reports[2].outcome, PatchOutcome::FullyPatched);
    assert_eq!(reports[3].outcome, PatchOutcome::ImportOnlyPatched);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    let target = write(dir.path(), "route.ts", TRY_HANDLER);
    let cfg = config(vec![target]);
    let path = dir.path().join("route.ts");

    run(&cfg, &options(dir.path(), 1)).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let reports = run(&cfg, &options(dir.path(), 1)).unwrap();
    assert_eq!(reports[0].outcome, PatchOutcome::Skipped);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);

    assert_eq!(first.matches(DEFAULT_MARKER).count(), 1);
    assert_eq!(first.matches(DEFAULT_IMPORT_LINE).count(), 1);
}

#[test]
fn test_import_follows_last_import_and_snippet_follows_try() {
    let dir = tempdir().unwrap();
    let target = write(dir.path(), "route.ts", TRY_HANDLER);
    run(&config(vec![target]), &options(dir.path(), 1)).unwrap();

    let patched = fs::read_to_string(dir.path().join("route.ts")).unwrap();
    let expected_head = format!(
        "import {{ NextResponse }} from 'next/server';\nimport {{ createClient }} from '@/lib/supabase/server';\n{}\n\nexport async function POST(request: Request) {{\n  try {{\n{}    const body",
        DEFAULT_IMPORT_LINE, DEFAULT_SNIPPET
    );
    assert!(patched.starts_with(&expected_head));
}

#[test]
fn test_signature_fallback_on_disk() {
    let dir = tempdir().unwrap();
    let target = write(dir.path(), "route.ts", PLAIN_HANDLER);
    run(&config(vec![target]), &options(dir.path(), 1)).unwrap();

    let patched = fs::read_to_string(dir.path().join("route.ts")).unwrap();
    assert!(patched.contains(&format!(
        "export async function GET(request: Request) {{\n{}  return NextResponse",
        DEFAULT_SNIPPET
    )));
}

#[test]
fn test_parallel_matches_sequential() {
    let seq_dir = tempdir().unwrap();
    let par_dir = tempdir().unwrap();

    let mut targets = Vec::new();
    for (i, body) in [TRY_HANDLER, PLAIN_HANDLER, ARROW_HANDLER, TRY_HANDLER]
        .iter()
        .enumerate()
    {
        let rel = format!("src/app/api/r{}/route.ts", i);
        write(seq_dir.path(), &rel, body);
        targets.push(write(par_dir.path(), &rel, body));
    }
    targets.push(PathBuf::from("src/app/api/none/route.ts"));

    let seq = run(&config(targets.clone()), &options(seq_dir.path(), 1)).unwrap();
    let par = run(&config(targets.clone()), &options(par_dir.path(), 4)).unwrap();

    assert_eq!(seq.len(), par.len());
    for (s, p) in seq.iter().zip(&par) {
        assert_eq!(s.path, p.path);
        match (&s.outcome, &p.outcome) {
            (PatchOutcome::Failed(_), PatchOutcome::Failed(_)) => {}
            (a, b) => assert_eq!(a, b),
        }
    }

    for target in targets.iter().take(4) {
        assert_eq!(
            fs::read_to_string(seq_dir.path().join(target)).unwrap(),
            fs::read_to_string(par_dir.path().join(target)).unwrap()
        );
    }
}

#[test]
fn test_custom_guard_from_yaml() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "route.ts",
        "import { NextResponse } from 'next/server';\n\nexport async function PUT(request: Request) {\n  return NextResponse.json({});\n}\n",
    );

    let yaml = r#"
targets: [route.ts]
guard:
  import_line: "import { audit } from '@/lib/audit';"
  snippet: "  await audit(request);\n"
  marker: "audit(request)"
  handler_verbs: [PUT]
"#;
    let cfg = PatchConfig::from_yaml(yaml).unwrap();
    let reports = run(&cfg, &options(dir.path(), 1)).unwrap();
    assert_eq!(reports[0].outcome, PatchOutcome::FullyPatched);

    let patched = fs::read_to_string(dir.path().join("route.ts")).unwrap();
    assert_eq!(
        patched,
        "import { NextResponse } from 'next/server';\nimport { audit } from '@/lib/audit';\n\nexport async function PUT(request: Request) {\n  await audit(request);\n  return NextResponse.json({});\n}\n"
    );
}

#[test]
fn test_semicolon_less_imports_keep_body_intact() {
    let dir = tempdir().unwrap();
    let source = "import { NextResponse } from 'next/server'\n\nexport async function GET(request: Request) {\n  const a = 1\n  return NextResponse.json({ a });\n}\n";
    let target = write(dir.path(), "route.ts", source);
    let reports = run(&config(vec![target]), &options(dir.path(), 1)).unwrap();

    assert_eq!(reports[0].outcome, PatchOutcome::SnippetOnlyPatched);
    let patched = fs::read_to_string(dir.path().join("route.ts")).unwrap();
    assert!(!patched.contains(DEFAULT_IMPORT_LINE));
    assert_eq!(
        patched,
        format!(
            "import {{ NextResponse }} from 'next/server'\n\nexport async function GET(request: Request) {{\n{}  const a = 1\n  return NextResponse.json({{ a }});\n}}\n",
            DEFAULT_SNIPPET
        )
    );
}

#[test]
fn test_import_only_file_stays_reported_on_rerun() {
    let dir = tempdir().unwrap();
    let target = write(dir.path(), "route.ts", ARROW_HANDLER);
    let cfg = config(vec![target]);

    let first = run(&cfg, &options(dir.path(), 1)).unwrap();
    assert_eq!(first[0].outcome, PatchOutcome::ImportOnlyPatched);
    let after_first = fs::read_to_string(dir.path().join("route.ts")).unwrap();

    let second = run(&cfg, &options(dir.path(), 1)).unwrap();
    assert_eq!(second[0].outcome, PatchOutcome::NoChangeNoAnchor);
    assert_eq!(
        fs::read_to_string(dir.path().join("route.ts")).unwrap(),
        after_first
    );
}
