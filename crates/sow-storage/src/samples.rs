//! Sample SOW templates seeded on first run.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::StorageError;

const WEB_DEVELOPMENT: &str = r"# Statement of Work: {{project_name}}

**Client:** {{client_name}}
**Prepared by:** {{consultant_name}}
**Date:** {{date}}

## Overview

{{consultant_name}} will design, build, and launch a responsive website
for {{client_name}}.

## Scope of Work

- Discovery workshop and requirements document
- Visual design for up to 8 page templates
- Responsive implementation and CMS integration
- Launch support and handover

:::pricing
| Item | Amount |
|------|--------|
| Design | $4,500 |
| Development | $9,000 |
| Launch support | $1,500 |
discount: 10%
tax: 8%
:::

:::timeline
- Week 1-2: Discovery and design
- Week 3-5: Development
- Week 6: QA and launch
:::

:::signature
Name: {{client_name}}
Title: Client
Date:
---
Name: {{consultant_name}}
Title: Consultant
Date:
:::
";

const CONSULTING: &str = r"# Consulting Proposal: {{project_name}}

**Client:** {{client_name}}
**Consultant:** {{consultant_name}}
**Date:** {{date}}

## Engagement

A focused consulting engagement covering strategy, audit, and an
actionable roadmap for {{client_name}}.

:::pricing
| Item | Amount |
|------|--------|
| Strategy sessions | $3,000 |
| Technical audit | $2,500 |
| Roadmap report | $1,500 |
:::

:::timeline
- Week 1: Kickoff and interviews
- Week 2-3: Audit
- Week 4: Roadmap delivery
:::

:::signature
Name: {{client_name}}
Date:
---
Name: {{consultant_name}}
Date:
:::
";

const SAAS_PROJECT: &str = r"# Project Brief: {{project_name}}

**Client:** {{client_name}}
**Prepared by:** {{consultant_name}}
**Date:** {{date}}

## Summary

MVP build of a multi-tenant SaaS platform, from data model through a
hosted beta.

## Deliverables

- Authentication and tenant management
- Core product workflows
- Billing integration
- Beta deployment

:::pricing
| Item | Amount |
|------|--------|
| Platform foundation | $12,000 |
| Core features | $18,000 |
| Billing and beta launch | $6,000 |
discount: 5%
tax: 8%
:::

:::timeline
- Week 1-3: Foundation
- Week 4-8: Core features
- Week 9-10: Billing
- Week 11-12: Beta launch
:::

:::signature
Name: {{client_name}}
Title: Client
Date:
---
Name: {{consultant_name}}
Title: Consultant
Date:
:::
";

/// Insert the sample templates. Called once, when the templates table is
/// empty.
pub(crate) async fn seed(pool: &SqlitePool) -> Result<(), StorageError> {
    let samples = [
        (
            "Web Development SOW",
            "Standard statement of work for web development projects",
            WEB_DEVELOPMENT,
            "Web Development Project",
        ),
        (
            "Consulting Proposal",
            "Professional consulting engagement proposal",
            CONSULTING,
            "Consulting Engagement",
        ),
        (
            "SaaS Project Brief",
            "SaaS product development project brief and SOW",
            SAAS_PROJECT,
            "SaaS Platform",
        ),
    ];

    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();
    let timestamp = now.to_rfc3339();

    for (name, description, markdown, project_name) in samples {
        let variables = serde_json::json!({
            "client_name": "Client Name",
            "project_name": project_name,
            "consultant_name": "Your Name",
            "date": today,
        });
        sqlx::query(
            "INSERT INTO templates (name, description, markdown, variables, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(markdown)
        .bind(variables.to_string())
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(pool)
        .await?;
    }

    Ok(())
}
