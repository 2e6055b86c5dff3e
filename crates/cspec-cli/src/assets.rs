//! Files `cspec init` / `cspec update` write into a project.

pub const BANNER: &str = r#"
   ____ ____  ____  _____ ____
  / ___/ ___||  _ \| ____/ ___|
 | |   \___ \| |_) |  _|| |
 | |___ ___) |  __/| |__| |___
  \____|____/|_|   |_____\____|

  Spec-driven development for the age of coding agents
"#;

/// Slash commands installed under `.claude/commands/cspec/`, invoked as `/cspec:<stem>`.
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("work-start.md", WORK_START_COMMAND),
    ("issue-validate.md", ISSUE_VALIDATE_COMMAND),
    ("proposal-write.md", PROPOSAL_WRITE_COMMAND),
    ("spec-write.md", SPEC_WRITE_COMMAND),
    ("plan-write.md", PLAN_WRITE_COMMAND),
    ("work-complete.md", WORK_COMPLETE_COMMAND),
];

const WORK_START_COMMAND: &str = r#"---
description: Start a work item and draft its issue document
argument-hint: <slug> <description>
allowed-tools: Bash, Read, Write
---

# cspec:work-start

Create `cspec/work/<slug>/` and write `issue.md` for the change described.

## Steps

1. Pick the issue template closest to the change and read it:

   ```bash
   cspec templates list
   cspec templates get <name>
   ```

2. Write `cspec/work/<slug>/issue.md`. It must start with YAML frontmatter:

   ```yaml
   ---
   id: ISSUE-001
   title: <at most 100 characters>
   nature: feature
   impact: additive
   version: minor
   status: draft
   created: 2026-01-15
   updated: 2026-01-15
   context:
     required: []
     recommended: []
   ---
   ```

   The body needs `## Problem`, `## Scope` with a `### In Scope` list, and
   `## Acceptance Criteria` with at least one `- [ ]` item.

3. Run `/cspec:issue-validate <slug>` and fix every error it reports.
"#;

const ISSUE_VALIDATE_COMMAND: &str = r#"---
description: Validate a work item's issue document
argument-hint: <slug>
allowed-tools: Bash, Read, Edit
---

# cspec:issue-validate

```bash
cspec validate --work <slug>
```

Fix each error in `cspec/work/<slug>/issue.md` and re-run until the verdict
is `pass` or `pass_with_warnings`. Warnings name context types the issue's
nature expects; add a `context.required` entry for each one you can supply.
"#;

const PROPOSAL_WRITE_COMMAND: &str = r#"---
description: Draft a solution proposal for a work item
argument-hint: <slug>
allowed-tools: Bash, Read, Write
---

# cspec:proposal-write

Read `cspec/work/<slug>/issue.md` and any files under `context/`, then write
`cspec/work/<slug>/proposal.md`: the approach, alternatives considered, and
the specs it will touch. Keep it short enough to review in one sitting.
"#;

const SPEC_WRITE_COMMAND: &str = r#"---
description: Write or revise a feature spec inside a work item
argument-hint: <slug> <feature>
allowed-tools: Bash, Read, Write
---

# cspec:spec-write

Write `cspec/work/<slug>/spec-<feature>.md`. If `cspec/specs/<feature>/spec.md`
already exists, start from it:

```bash
cspec specs show <feature>
```

The first line is the spec title as a `#` heading. Diagrams go next to it as
`*.mmd` files.
"#;

const PLAN_WRITE_COMMAND: &str = r#"---
description: Turn the proposal and specs into an implementation plan
argument-hint: <slug>
allowed-tools: Bash, Read, Write
---

# cspec:plan-write

```bash
cspec work show <slug>
```

Write `cspec/work/<slug>/plan.md` as an ordered checklist. Each step names
the files it changes and the acceptance criterion it satisfies.
"#;

const WORK_COMPLETE_COMMAND: &str = r#"---
description: Promote a work item's specs and clean up
argument-hint: <slug>
allowed-tools: Bash, Read, Write
---

# cspec:work-complete

1. `cspec validate --work <slug> --strict` must pass.
2. Move every `spec-<feature>.md` to `cspec/specs/<feature>/spec.md`.
3. Delete `cspec/work/<slug>/`.
4. `cspec status` must report HEALTHY.
"#;

pub const AGENTS_MD_TEMPLATE: &str = r#"# AGENTS.md

This project uses cspec for spec-driven development.

## Layout

- `cspec/specs/<feature>/spec.md`: permanent feature specs, the source of truth.
- `cspec/work/<slug>/`: one directory per change in flight (`issue.md`,
  `proposal.md`, `spec-<feature>.md`, `context/`).

## Workflow

1. `/cspec:work-start <slug> <description>`
2. `/cspec:issue-validate <slug>`
3. `/cspec:proposal-write <slug>`
4. `/cspec:spec-write <slug> <feature>`
5. `/cspec:plan-write <slug>`
6. `/cspec:work-complete <slug>`

Run `cspec status` at any time to check project health.

## PROJECT CONTEXT

### Project Overview

<Brief description from codebase analysis>

### Tech Stack

- **Languages**:
- **Frameworks**:

### Architecture

### Key Conventions

### Testing
"#;

pub const ONBOARD_PROMPT: &str = r#"# Project Onboarding

You are onboarding to a spec-driven development project. Populate the
`## PROJECT CONTEXT` section of AGENTS.md from an analysis of the codebase.

## Step 1: Check project status

```bash
cspec status
```

Note whether `cspec/specs/` and `cspec/work/` exist, which specs exist, and
what work is in progress.

## Step 2: Analyze the codebase

1. **Project structure**: directory layout and organization
2. **Tech stack**: languages and package manifests (Cargo.toml, package.json, pyproject.toml, go.mod)
3. **Architecture**: entry points, key modules, data flow
4. **Conventions**: lint and format configs, naming patterns
5. **Testing**: test directories, frameworks, commands
6. **Build and deploy**: build scripts, CI configs
7. **Existing specs**: everything under `cspec/specs/`

## Step 3: Update AGENTS.md

Fill in every subsection under `## PROJECT CONTEXT`:

```markdown
## PROJECT CONTEXT

### Project Overview

<What the project does and who uses it>

### Tech Stack

- **Languages**: <languages>
- **Frameworks**: <frameworks>
- **Key Dependencies**: <dependencies>

### Architecture

- Entry points: <main files>
- Key modules: <core components>

### Key Conventions

- **Naming**: <patterns>
- **File Structure**: <organization>

### Testing

- **Run Tests**: `<command>`
```

Do not touch anything above `## PROJECT CONTEXT`; `cspec update` rewrites it.

## Step 4: Summarize

Report what you found and suggest `/cspec:work-start` as the next step.
Ask clarifying questions when something is ambiguous.
"#;
