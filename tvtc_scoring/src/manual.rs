/*!

This is the long-form manual for `tvtc_scoring` and `tvtcscore`.

## The rubric

An evaluation covers six sections. Each section has a maximum and the maxima add up to 100:

| section                  | key                      | maximum |
|--------------------------|--------------------------|---------|
| Strategic planning       | `strategicPlanning`      | 10      |
| Operational management   | `operationalManagement`  | 30      |
| Teaching and learning    | `teachingLearning`       | 20      |
| Stakeholders engagement  | `stakeholdersEngagement` | 10      |
| Continuous improvement   | `continuousImprovement`  | 10      |
| Infrastructure           | `infrastructure`         | 20      |

Sections are split into named groups (the tabs of the paper form) and each group lists
evidence items. An item has an id, a label, the marks it is worth, and tells whether the
*availability* and the *quality* dimensions apply to it. Run `tvtcscore --print-rubric` to
see the whole catalog.

Operational management and infrastructure contain items that only apply to day
centres (changing rooms, lockers, ...) and items that only apply to boarding centres
(dormitories, boarding rosters, ...). The two subsets are worth the same marks. When the
school type has not been selected, neither subset is active: these sections can then
reach at most 28 and 18 marks, and the survey cannot be submitted.

## Scoring an item

Each dimension is answered `yes`, `no`, `n/a` or left empty.

* if quality is `n/a` (or does not apply to the item), the item is worth its full marks when
  availability is `yes` and nothing otherwise;
* otherwise, if availability is `n/a` (or does not apply), the item is worth its full marks
  when quality is `yes` and nothing otherwise;
* otherwise availability earns 40% of the marks and quality earns 60%.

Anything that is not an explicit `yes` earns nothing. Example: an item worth `0.5` with
availability `yes` and quality `no` scores `0.2`.

The total of a section is the sum of its active items, capped at the section maximum. The
overall score is the sum of the six section totals.

## Configuration

`tvtcscore --config evaluation.json` reads a configuration such as:

```json
{
  "outputSettings": {
    "centreName": "Kigali Technical Centre",
    "evaluatorName": "A. Evaluator",
    "evaluationDate": "2024-05-14",
    "outputDirectory": "out"
  },
  "schoolType": "boarding",
  "responseSources": [
    { "provider": "json", "filePath": "responses.json" },
    { "provider": "xlsx", "filePath": "infrastructure.xlsx",
      "section": "infrastructure", "excelWorksheetName": "Infrastructure" }
  ],
  "draft": { "directory": "drafts", "instanceId": "centre-042" }
}
```

Relative paths are resolved against the directory of the configuration file. The command line
flags override the values of the configuration.

## Input formats

### `json`

The same format as the drafts:

```json
{
  "schoolType": "day",
  "sections": {
    "strategicPlanning": {
      "responses": {
        "sp_strategic_plan": { "availability": "yes", "quality": "no",
                               "observation": "plan expired last year" }
      },
      "overview": { "strength": "...", "weakness": "...", "improvement": "..." }
    }
  }
}
```

### `xlsx`

One worksheet per section. The first row is a header that must name the `item`,
`availability` and `quality` columns (an `observation` column is optional). The section is
given by the `section` field of the source (or `--section` on the command line).

Unknown item ids are rejected. Answers that cannot be understood are treated as empty, with
a warning.

## Drafts

With `--draft-dir` and `--instance-id` (or the `draft` block of the configuration), the
survey is reloaded from the draft of that instance before the inputs are applied, and saved
back afterwards. A draft that is missing, unreadable, empty or made against another version of
the rubric is ignored and the survey starts from scratch. Saving is best effort: a failure is
logged and does not change the scores. The draft is deleted once the survey is submitted with
`--submit`.

*/
